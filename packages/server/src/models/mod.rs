pub mod conference;
pub mod participant;
pub mod recording;
pub mod session;
pub mod shared;
pub mod webhook;
