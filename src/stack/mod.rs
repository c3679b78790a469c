//! Pending-decision resolution.
//!
//! Effects that need more player input push follow-up templates onto a
//! [`PendingQueue`]. While the queue is non-empty it alone decides which
//! input is legal; the turn ends only once it drains.
//!
//! ## Example
//!
//! ```
//! use everdell_engine::adornments::AdornmentName;
//! use everdell_engine::core::{
//!     Choice, GameInput, InputContext, InputKind, ResourceType, SelectOption,
//! };
//! use everdell_engine::stack::PendingQueue;
//!
//! let prompt = GameInput::SelectOption(SelectOption {
//!     context: InputContext::new(InputKind::PlayAdornment, AdornmentName::Spyglass),
//!     options: Choice::any_resource(),
//!     client_options: None,
//! });
//!
//! let mut queue = PendingQueue::new();
//! queue.push(prompt.clone());
//!
//! let answer = prompt.with_choice(Choice::Resource(ResourceType::Resin));
//! assert!(queue.accept(&answer).is_ok());
//! assert!(queue.is_empty());
//! ```

mod pending;

pub use pending::{validate_selection, PendingQueue, QueueMark};
