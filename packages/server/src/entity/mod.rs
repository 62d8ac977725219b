pub mod conference;
pub mod participant;
pub mod recording;
pub mod session;
