//! Handler fuer alle eingehenden Events
//!
//! Jeder Handler ist fuer eine Event-Gruppe zustaendig, laeuft synchron
//! innerhalb eines Dispatcher-Schritts und hat Zugriff auf den
//! gemeinsamen SignalingState.

pub mod chat_handler;
pub mod room_handler;
pub mod signal_handler;
