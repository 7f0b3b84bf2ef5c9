//! Rewired storefront library.
//!
//! The headless core of the Rewired shop: everything except the rendered
//! page. An embedding UI reads store state, calls store actions, and drains
//! the notification queue; the stores talk to the Supabase backend through
//! the gateway in [`supabase`].
//!
//! # Architecture
//!
//! - [`supabase`] - typed gateway to the backend (PostgREST rows + GoTrue
//!   auth), with product caching and error-to-notification mapping
//! - [`stores`] - cart and wishlist state containers with optimistic
//!   updates and rollback
//! - [`filters`] - the query-string-driven product filter engine
//! - [`checkout`] - the linear cart → shipping → payment → confirmation flow
//! - [`state`] - the application state container injected at the app root
//!
//! # Example
//!
//! ```rust,ignore
//! use rewired_storefront::config::StorefrontConfig;
//! use rewired_storefront::state::AppState;
//!
//! let config = StorefrontConfig::from_env()?;
//! let state = AppState::new(config)?;
//!
//! state.supabase().sign_in("shopper@example.com", "hunter2!").await?;
//! let products = state.supabase().get_products().await?;
//! state.cart().add_item(&products[0], 1).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod config;
pub mod filters;
pub mod fixtures;
pub mod notifications;
pub mod state;
pub mod stores;
pub mod supabase;
pub mod telemetry;
