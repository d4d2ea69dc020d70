//! Scripted adapter stubs shared by the integration tests.
#![allow(dead_code)] // not every test binary exercises every stub

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tripsmith::adapters::{AdapterError, Inference, PlaceSearch, WeatherLookup};

/// Inference stub that replays a fixed script of responses in order.
///
/// Every prompt is recorded; an exhausted script surfaces as a provider
/// error, so a test that triggers more calls than it scripted fails loudly.
#[derive(Default)]
pub struct ScriptedInference {
    responses: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedInference {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Inference for ScriptedInference {
    async fn complete(&self, prompt: &str) -> Result<String, AdapterError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(AdapterError::Provider {
                provider: "scripted",
                message: "inference script exhausted".to_string(),
            })
    }
}

/// Weather stub returning a fixed forecast summary.
pub struct StaticWeather(pub &'static str);

#[async_trait]
impl WeatherLookup for StaticWeather {
    async fn forecast(&self, _city: &str, _days: u32) -> Result<String, AdapterError> {
        Ok(self.0.to_string())
    }
}

/// Weather stub that always fails at the provider level.
pub struct FailingWeather;

#[async_trait]
impl WeatherLookup for FailingWeather {
    async fn forecast(&self, _city: &str, _days: u32) -> Result<String, AdapterError> {
        Err(AdapterError::Provider {
            provider: "openweathermap",
            message: "network down".to_string(),
        })
    }
}

/// Place-search stub that records every query and fails for the configured
/// categories only.
#[derive(Default)]
pub struct RecordingSearch {
    queries: Mutex<Vec<(String, String)>>,
    fail_categories: Vec<String>,
}

impl RecordingSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queries: Mutex::new(Vec::new()),
            fail_categories: categories.into_iter().map(Into::into).collect(),
        }
    }

    /// Recorded (city, category) pairs in call order.
    pub fn queries(&self) -> Vec<(String, String)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlaceSearch for RecordingSearch {
    async fn find_places(&self, city: &str, category: &str) -> Result<String, AdapterError> {
        self.queries
            .lock()
            .unwrap()
            .push((city.to_string(), category.to_string()));
        if self.fail_categories.iter().any(|c| c == category) {
            return Err(AdapterError::Provider {
                provider: "search",
                message: "search offline".to_string(),
            });
        }
        Ok(format!("Top venues for {category}: Alpha Hall, Beta Garden"))
    }
}
