//! HTTP front of the vending machine: routing, handlers, page rendering.

pub mod app;
pub mod middleware;
