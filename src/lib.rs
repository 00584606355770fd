//! Core library for the muster-tools command line application.
//!
//! The library exposes high-level orchestration helpers that power the
//! command-line interface as well as the integration tests. The modules are
//! structured to keep responsibilities narrow and composable: IO adapters
//! live under [`muster::tools::io`], data representations inside
//! [`muster::tools::model`], row classification and aggregation in
//! [`muster::tools::classify`] and [`muster::tools::aggregate`], chart
//! geometry in [`muster::tools::layout`], artefact generation under
//! [`muster::tools::render`], and the end-to-end orchestration in
//! [`muster::tools::pipeline`].

pub mod muster;

pub use muster::tools::{
    Result, ToolError, aggregate, classify, error, io, layout, model, pipeline, render,
};
