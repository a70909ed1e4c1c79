#[derive(Debug, Clone)]
pub struct Subject {
    id: String,
    name: String,
    description: String,
    system_prompt: String,
}

impl Subject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            description: String::new(),
            system_prompt: String::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The sole behavioral contract with the model backend: instructs
    /// the model to respond only with guiding questions.
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }
}
