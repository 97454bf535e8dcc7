//! Scenario and property test suite for the APT simulator.
//!
//! Exercises the revenue projector and the economy recurrence together and
//! checks the supply invariants under arbitrary valid parameters.

pub mod helpers;
