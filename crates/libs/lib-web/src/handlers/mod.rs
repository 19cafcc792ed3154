//! # HTTP Request Handlers
//!
//! Axum HTTP request handlers organized by feature domain.
//!
//! ## Handler Modules
//!
//! - **[`auth`]**: Registration and login
//!   - `POST /chat-app-api/v1/register` - Create new user account
//!   - `POST /chat-app-api/v1/login` - Authenticate with email/password
//!
//! - **[`user`]**: Profile of the authenticated user (token required)
//!   - `GET /chat-app-api/v1/profile` - Current user
//!   - `PUT /chat-app-api/v1/profile` - Update name and email
//!   - `POST /chat-app-api/v1/profile/picture` - Upload profile picture
//!
//! ## Handler Architecture
//!
//! All handlers follow Axum's extractor pattern and return
//! `lib_core::Result<T>`; [`AppError`](lib_core::AppError) renders as a JSON
//! error body with the matching status code.
//!
//! ```rust,ignore
//! async fn handler(
//!     State(store): State<Arc<dyn UserStore>>,          // Shared state
//!     ctx: Ctx,                                         // Authenticated user
//!     payload: Result<Json<RequestBody>, JsonRejection>, // Request body
//! ) -> Result<Json<Response>> {
//!     let Json(req) = payload?;
//!     req.validate()?;
//!     // Handler logic...
//! }
//! ```
//!
//! The body is taken as `Result<Json<_>, JsonRejection>` so that malformed
//! JSON becomes a `400` validation error instead of axum's default `422`.
//!
//! ## Request/Response Flow
//!
//! ```text
//! Client Request
//!     ↓
//! CORS → request stamp → trace span → logging → cookies
//!     ↓
//! Auth gate (protected routes only)
//!     ↓
//! Handler
//!     ↓
//! Client Response
//! ```

pub mod auth;
pub mod user;
