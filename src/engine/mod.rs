//! Generic recipe execution engine.
//!
//! A recipe is data (ordered metasteps of steps); a concrete recipe type is
//! code (a [`Cook`] with a [`HandlerRegistry`]). The engine walks the data,
//! dispatches each step to its handler, validates operator answers against
//! typed contracts, routes annotations, and serves the final [`Dish`].
mod annotation;
mod error;
mod input;
mod kitchen;
mod lifecycle;
mod model;
mod operator;
mod registry;
mod runner;
mod serve;

pub use annotation::Annotation;
pub use error::RecipeError;
pub use input::is_identifier;
pub use kitchen::Kitchen;
pub use model::{Metastep, Recipe, Step};
pub use operator::{format_query, Console, Level, Operator};
pub use registry::HandlerRegistry;
pub use runner::{Chef, Cook};
pub use serve::{serve, Dish, RenderedFile, Serving, TemplateRenderer};
