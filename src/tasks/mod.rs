//! Background tasks module
//! 
//! This module contains the countdown loop spawned by the timer controller.

pub mod countdown;

pub(crate) use countdown::countdown_task;
