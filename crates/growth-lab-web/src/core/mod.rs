//! Core, DOM-free primitives and helpers for the landing page.
pub mod capability;
pub mod carousel;
pub mod chart;
pub mod clipboard;
pub mod config;
pub mod copy;
pub mod disclosure;
pub mod error;
pub mod form;
pub mod marquee;
pub mod modal;
pub mod motion;
pub mod nav;
pub mod preloader;
pub mod reveal;
pub mod scroll;
pub mod theme;
