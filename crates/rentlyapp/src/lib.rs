//! # Rently Architecture
//!
//! Rently is a **UI-agnostic property-rental listing library**. This is not
//! a CLI application that happens to have some library code; it's a
//! library that happens to ship a CLI client.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client (the rently binary, or any other UI)                │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over reads and commands                     │
//! │  - Authenticates via the session provider                   │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Authenticated mutations: create/update/delete listing,   │
//! │    favorite toggle, inquiry read-toggle/delete              │
//! │  - Validation, ownership checks, compensating actions       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - ListingStore trait: queries, pagination, cascades        │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! External collaborators (the media host, the session/auth provider, the
//! hosting layer's route cache) sit behind traits ([`media::MediaStore`],
//! [`session::SessionProvider`], [`revalidate::Revalidator`]) so the core
//! stays testable and host-independent.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular arguments, returns regular
//! types, and never writes to stdout or assumes a terminal. The same core
//! could serve a web front end unchanged.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, the entry point for all operations
//! - [`commands`]: The action layer (authenticated mutations)
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Persisted document types
//! - [`query`]: The listing search predicate
//! - [`pagination`]: Responsive items-per-page tiers and page math
//! - [`forms`]: Property form validation
//! - [`media`], [`session`], [`revalidate`]: collaborator seams
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod forms;
pub mod media;
pub mod model;
pub mod pagination;
pub mod query;
pub mod revalidate;
pub mod session;
pub mod store;
