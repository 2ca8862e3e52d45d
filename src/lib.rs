//! Triage Desk - Support-request triage core for hospital radiology.
//!
//! Free-text issue descriptions from radiology staff are classified into
//! exactly one support department, checked against that department's hours
//! of operation, and answered with contact details plus a drafted support
//! email. Accumulated request history can be synthesized into themed FAQs.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
