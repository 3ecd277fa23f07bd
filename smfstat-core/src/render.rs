mod human;
mod structured;

pub use human::{render_human, verdict, write_report};
pub use structured::{
    StructuredHost, StructuredReport, StructuredThread, build_document, render_structured,
};
