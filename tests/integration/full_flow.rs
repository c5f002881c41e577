//! Full wizard walk-throughs, from first selection to handoff.

use rust_decimal_macros::dec;
use std::cell::RefCell;

use quote_wizard::config::AppConfig;
use quote_wizard::handoff::{HandoffPayload, HandoffReceipt, HandoffSink, QueryStringRedirect};
use quote_wizard::pricing::PricingTable;
use quote_wizard::types::{Field, WizardError};
use quote_wizard::wizard::step::Step;
use quote_wizard::wizard::{Transition, WizardSession};

/// Records every payload it receives; can be told to fail.
#[derive(Default)]
struct RecordingSink {
    delivered: RefCell<Vec<HandoffPayload>>,
    fail: bool,
}

impl HandoffSink for RecordingSink {
    fn deliver(&self, payload: &HandoffPayload) -> Result<HandoffReceipt, WizardError> {
        if self.fail {
            return Err(WizardError::Handoff {
                transport: "recording".into(),
                message: "destination unavailable".into(),
            });
        }
        self.delivered.borrow_mut().push(payload.clone());
        Ok(HandoffReceipt::Redirect { url: "about:blank".into() })
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

fn fill_presentation(session: &mut WizardSession) {
    session.select_option(Field::ProjectType, "presentation");
    session.set_field(Field::PageCount, "5");
    session.select_option(Field::DesignTier, "custom");
    session.set_field(Field::ContactName, "Ana");
    session.set_field(Field::ContactPhone, "0712345678");
}

#[test]
fn test_presentation_custom_flow() {
    let mut session = WizardSession::new(PricingTable::default());
    let sink = RecordingSink::default();

    session.select_option(Field::ProjectType, "presentation");
    assert_eq!(session.advance_with(&sink).unwrap(), None);
    session.set_field(Field::PageCount, "5");
    assert_eq!(session.advance_with(&sink).unwrap(), None);
    session.select_option(Field::DesignTier, "custom");
    assert_eq!(session.advance_with(&sink).unwrap(), None);
    assert_eq!(session.current_step(), Step::Contact);

    session.set_field(Field::ContactName, "Ana");
    session.set_field(Field::ContactPhone, "0712345678");
    assert!(session.controls().forward_enabled);

    let receipt = session.advance_with(&sink).unwrap();
    assert!(receipt.is_some());

    let delivered = sink.delivered.borrow();
    assert_eq!(delivered.len(), 1);
    let payload = &delivered[0];
    assert_eq!(payload.type_name, "Site de Prezentare");
    assert_eq!(payload.design_name, "Custom");
    assert_eq!(payload.price_min, "1800");
    assert_eq!(payload.price_max, "2200");
    assert_eq!(payload.name, "Ana");
    assert_eq!(payload.phone, "0712345678");
    assert_eq!(payload.email, "");
    assert_eq!(payload.pages, "5");
}

#[test]
fn test_back_and_forth_changes_quote() {
    let mut session = WizardSession::new(PricingTable::default());
    fill_presentation(&mut session);
    for _ in 0..3 {
        session.advance();
    }

    // Revisit the design step and downgrade
    session.retreat();
    assert_eq!(session.current_step(), Step::DesignTier);
    session.select_option(Field::DesignTier, "basic");
    session.advance();

    let Transition::Submitted(sub) = session.advance() else {
        panic!("expected submission");
    };
    assert_eq!(sub.quote.total, dec!(1000));
    assert_eq!(sub.payload.design_name, "Basic");
}

#[test]
fn test_cannot_skip_invalid_steps() {
    let mut session = WizardSession::new(PricingTable::default());
    for _ in 0..10 {
        session.advance();
    }
    assert_eq!(session.current_step(), Step::ProjectType);
    assert!(!session.is_submitted());

    session.select_option(Field::ProjectType, "landing");
    session.set_field(Field::PageCount, "-2");
    for _ in 0..10 {
        session.advance();
    }
    assert_eq!(session.current_step(), Step::PageCount);
}

#[test]
fn test_failed_handoff_can_be_retried() {
    let mut session = WizardSession::new(PricingTable::default());
    fill_presentation(&mut session);
    for _ in 0..3 {
        session.advance();
    }

    let failing = RecordingSink { fail: true, ..Default::default() };
    let err = session.advance_with(&failing).unwrap_err();
    assert!(err.to_string().contains("destination unavailable"));
    assert!(!session.is_submitted());

    let working = RecordingSink::default();
    assert!(session.advance_with(&working).unwrap().is_some());
    assert_eq!(working.delivered.borrow().len(), 1);
}

#[test]
fn test_redirect_transport_url() {
    let mut session = WizardSession::new(PricingTable::default());
    fill_presentation(&mut session);
    session.set_field(Field::ContactEmail, "ana@example.ro");
    for _ in 0..3 {
        session.advance();
    }

    let sink = QueryStringRedirect::default();
    let Some(HandoffReceipt::Redirect { url }) = session.advance_with(&sink).unwrap() else {
        panic!("expected a redirect");
    };
    assert!(url.starts_with("/pages/oferta?"));
    assert!(url.contains("email=ana%40example.ro"));
    assert!(url.contains("typeName=Site%20de%20Prezentare"));
    assert!(url.ends_with("priceMin=1800&priceMax=2200"));
}

#[test]
fn test_json_transport_from_config() {
    let mut path = std::env::temp_dir();
    path.push(format!("quote_wizard_flow_{}.json", uuid::Uuid::new_v4()));

    let cfg = AppConfig::parse(&format!(
        "[handoff]\ntransport = \"json_file\"\noutput_path = \"{}\"\n",
        path.display()
    ))
    .unwrap();
    let sink = quote_wizard::handoff::build_sink(&cfg.handoff).unwrap();
    let mut session = WizardSession::from_config(&cfg).unwrap();
    fill_presentation(&mut session);
    for _ in 0..3 {
        session.advance();
    }

    let receipt = session.advance_with(sink.as_ref()).unwrap();
    assert_eq!(receipt, Some(HandoffReceipt::Written { path: path.clone() }));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["typeName"], "Site de Prezentare");
    assert_eq!(json["priceMin"], "1800");

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_strict_email_from_config() {
    let cfg = AppConfig::parse("[wizard]\nenforce_email_format = true\n").unwrap();
    let mut session = WizardSession::from_config(&cfg).unwrap();
    fill_presentation(&mut session);
    session.set_field(Field::ContactEmail, "ana@");
    for _ in 0..3 {
        session.advance();
    }
    assert_eq!(session.advance(), Transition::Blocked { step: Step::Contact });
    assert!(!session.controls().forward_enabled);
}
