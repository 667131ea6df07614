//! Scenario tests spanning the world, queries, side classification and
//! contact resolution

mod lifecycle;
