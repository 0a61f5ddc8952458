//! Tests for autograd operations with gradient checking

mod prop_ops;
mod unit_ops;
