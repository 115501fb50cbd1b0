//! Hardware driver implementations
//!
//! Concrete implementations of the traits defined in haptos-core for
//! common hardware arrangements:
//!
//! - Vibration motors (plain GPIO on/off, PWM with carrier control)
//! - Button banks over GPIO lines
//! - Delay bridging from embedded-hal

#![no_std]
#![deny(unsafe_code)]

pub mod buttons;
pub mod delay;
pub mod motor;
