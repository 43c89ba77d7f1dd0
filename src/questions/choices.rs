//! @acp:module "Answer Vocabularies"
//! @acp:summary "Closed value domains of the standard questions"
//! @acp:domain engine
//! @acp:layer model

pub const FEATURES: &[&str] = &["adapter", "vis"];

pub const ADMIN_FEATURES: &[&str] = &["custom", "tab"];

pub const ADAPTER_TYPES: &[&str] = &[
    "alarm",
    "climate-control",
    "communication",
    "date-and-time",
    "energy",
    "metering",
    "garden",
    "general",
    "geoposition",
    "hardware",
    "health",
    "household",
    "infrastructure",
    "iot-systems",
    "lighting",
    "logic",
    "messaging",
    "misc-data",
    "multimedia",
    "network",
    "notifications",
    "protocols",
    "storage",
    "utility",
    "vehicle",
    "visualization",
    "visualization-icons",
    "weather",
];

/// The only type of a project without the adapter feature
pub const WIDGET_TYPES: &[&str] = &["visualization-widgets"];

pub const START_MODES: &[&str] = &["daemon", "schedule", "subscribe", "once", "none"];

pub const CONNECTION_TYPES: &[&str] = &["local", "cloud"];

pub const DATA_SOURCES: &[&str] = &["poll", "push", "assumption"];

pub const LANGUAGES: &[&str] = &["JavaScript", "TypeScript"];

pub const TOOLS: &[&str] = &[
    "ESLint",
    "Prettier",
    "type checking",
    "code coverage",
    "devcontainer",
];

pub const INDENTATION: &[&str] = &["Tab", "Space (4)"];

pub const QUOTES: &[&str] = &["single", "double"];

pub const GIT_PROTOCOLS: &[&str] = &["HTTPS", "SSH"];

pub const DEFAULT_BRANCHES: &[&str] = &["main", "master"];

pub const YES_NO: &[&str] = &["yes", "no"];
