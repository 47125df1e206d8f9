//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod form;
pub mod layout;
pub mod report;
pub mod theme;

pub use form::{Button, ErrorBanner, Input, Label, Textarea};
pub use layout::{AuthShell, Card, Container, Page, TopBar, TwoCol};
pub use report::{HistoryList, ResultPanel, Section};
pub use theme::ButtonVariant;
