//! Taskforge - Task Decomposition & Estimation Engine
//!
//! Takes a user task with optional project and team context, scores its
//! complexity and risk locally, asks an external oracle (an LLM) for a
//! breakdown proposal, and turns that proposal into sequenced, buffered,
//! styled subtasks.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, errors and the oracle port
//! - **Service Layer** (`services`): Duration codec, scoring, prompt,
//!   JSON extraction, post-processing and the analysis facade
//! - **Adapters** (`adapters`): Oracle backends (Claude Code CLI, Anthropic API, mock)
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use taskforge::adapters::oracles::MockOracle;
//! use taskforge::{TaskAnalyzer, TaskInput};
//!
//! # async fn demo() -> taskforge::DomainResult<()> {
//! let oracle = MockOracle::returning(r#"{"breakdowns":[{"title":"Draft","estimated_duration":"PT1H"}]}"#);
//! let analyzer = TaskAnalyzer::new(Arc::new(oracle));
//!
//! let task = TaskInput::new("Write blog post", "").with_estimated_duration("PT2H");
//! let analysis = analyzer.analyze(&task, None).await?;
//! let subtasks = analyzer.decompose(&task, &analysis);
//! assert_eq!(subtasks[0].estimated_duration, "PT1H12M");
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    AnalysisContext, Config, DecomposedTask, EnhancedAnalysis, SubtaskCandidate, TaskInput,
    TaskPriority,
};
pub use domain::ports::DecompositionOracle;
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::duration::{format_to_duration, parse_duration};
pub use services::{ExperienceCalculator, TaskAnalyzer};
