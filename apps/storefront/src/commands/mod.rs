//! # Commands Module
//!
//! Everything the storefront can be asked to do.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── cart.rs      ◄─── add, remove, update, remove all, show
//! └── checkout.rs  ◄─── checkout request, purge
//! ```
//!
//! ## Shape Of A Command
//! Each command takes the session it needs and returns a serialisable
//! response or an [`ApiError`](crate::error::ApiError):
//! ```rust,ignore
//! pub fn remove_line<S: CartStore>(
//!     session: &mut CartSession<S>,
//!     id: &str,
//! ) -> Result<RenderedViews, ApiError>
//! ```

pub mod cart;
pub mod checkout;
