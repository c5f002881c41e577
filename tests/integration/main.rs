//! Integration tests driving the public API end to end.

mod full_flow;
mod pricing_policy;
