//! treffpunkt-chat – Raum-Chat
//!
//! Dieses Crate implementiert den ChatRelay: ein rein fluechtiger,
//! append-only Nachrichtenverlauf fuer die Lebensdauer des Prozesses.
//! Das Verteilen an die Clients uebernimmt der Signaling-Service.
//!
//! # Beispiel
//!
//! ```
//! use treffpunkt_chat::{ChatRelay, VerlaufModus};
//! use treffpunkt_core::{ConnectionId, RoomId};
//!
//! let relay = ChatRelay::neu();
//! let raum = RoomId::new();
//! relay.nachricht_anhaengen("anna", ConnectionId::new(), raum, "Hallo");
//!
//! assert_eq!(relay.verlauf(VerlaufModus::Raum, &raum).len(), 1);
//! ```

pub mod relay;
pub mod types;


// Bequeme Re-Exporte
pub use relay::ChatRelay;
pub use types::{ChatNachricht, VerlaufModus};
