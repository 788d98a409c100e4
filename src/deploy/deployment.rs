// ABOUTME: Generic deployment struct parameterized by state marker.
// ABOUTME: Holds the run's configuration, collected warnings, and start time across transitions.

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::diagnostics::Diagnostics;

use super::state::{Initialized, OutputsFetched, WebsitePublished};

/// A deployment in progress, parameterized by its current state.
///
/// Every transition consumes the deployment, so steps can only run in order and
/// each at most once.
#[derive(Debug)]
pub struct Deployment<S> {
    pub(crate) config: Config,
    pub(crate) diagnostics: Diagnostics,
    pub(crate) started_at: DateTime<Utc>,
    pub(crate) state: S,
}

impl Deployment<Initialized> {
    pub fn new(config: Config) -> Self {
        Deployment {
            config,
            diagnostics: Diagnostics::default(),
            started_at: Utc::now(),
            state: Initialized,
        }
    }
}

impl<S> Deployment<S> {
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn state(&self) -> &S {
        &self.state
    }
}

impl Deployment<OutputsFetched> {
    pub fn outputs(&self) -> &crate::stack::StackOutputs {
        self.state.outputs()
    }
}

impl Deployment<WebsitePublished> {
    pub fn outputs(&self) -> &crate::stack::StackOutputs {
        self.state.outputs()
    }
}
