//! # Localization
//!
//! Every fixed, user-visible text lives in one [`Strings`] table per
//! [`Locale`]. The controller and the UI look texts up here instead of
//! carrying per-language copies of themselves.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    pub fn strings(self) -> &'static Strings {
        match self {
            Locale::En => &EN,
            Locale::Es => &ES,
        }
    }

    /// Parses a locale code such as `"en"`, `"es"` or `"es-MX"`.
    pub fn from_code(code: &str) -> Option<Locale> {
        let lang = code.split(['-', '_']).next()?.trim().to_ascii_lowercase();
        match lang.as_str() {
            "en" => Some(Locale::En),
            "es" => Some(Locale::Es),
            _ => None,
        }
    }
}

/// Fixed texts for one language variant.
#[derive(Debug)]
pub struct Strings {
    /// Stored as the server status message when the health probe fails.
    pub server_unreachable: &'static str,
    /// Content of the error message appended when a send fails.
    pub agent_unreachable: &'static str,
    pub thinking: &'static str,
    pub placeholder: &'static str,
    pub loading: &'static str,
    pub sending: &'static str,
    pub app_title: &'static str,
    pub chat_title: &'static str,
    pub clear_hint: &'static str,
    pub server_status_title: &'static str,
    pub status_label: &'static str,
    pub message_label: &'static str,
    pub agent_id_label: &'static str,
    pub region_label: &'static str,
    pub examples_title: &'static str,
    pub examples_hint: &'static str,
    pub welcome_title: &'static str,
    pub welcome_body: &'static str,
    pub user_label: &'static str,
    pub agent_label: &'static str,
    pub error_label: &'static str,
}

pub static EN: Strings = Strings {
    server_unreachable: "Cannot connect to server",
    agent_unreachable: concat!(
        "Error: Could not get response from agent. ",
        "Please verify that the server is running."
    ),
    thinking: "The agent is thinking...",
    placeholder: "Type your message here...",
    loading: "Loading...",
    sending: "Sending...",
    app_title: "Agent",
    chat_title: "Chat with Agent",
    clear_hint: "Ctrl+L: Clear Chat",
    server_status_title: "Server Status",
    status_label: "Status",
    message_label: "Message",
    agent_id_label: "Agent ID",
    region_label: "Region",
    examples_title: "Prompt Examples",
    examples_hint: "Tab: use example",
    welcome_title: "Hello! I'm your agent",
    welcome_body: "Send me a message to start our conversation.",
    user_label: "You",
    agent_label: "Agent",
    error_label: "Error",
};

pub static ES: Strings = Strings {
    server_unreachable: "No se puede conectar con el servidor",
    agent_unreachable: concat!(
        "Error: No se pudo obtener respuesta del agente. ",
        "Verifica que el servidor esté ejecutándose."
    ),
    thinking: "El agente está pensando...",
    placeholder: "Escribe tu mensaje aquí...",
    loading: "Cargando...",
    sending: "Enviando...",
    app_title: "Agente",
    chat_title: "Chat con Agente",
    clear_hint: "Ctrl+L: Limpiar Chat",
    server_status_title: "Estado del Servidor",
    status_label: "Estado",
    message_label: "Mensaje",
    agent_id_label: "Agent ID",
    region_label: "Región",
    examples_title: "Ejemplos de Prompts",
    examples_hint: "Tab: usar ejemplo",
    welcome_title: "¡Hola! Soy tu agente",
    welcome_body: "Envíame un mensaje para comenzar nuestra conversación.",
    user_label: "Tú",
    agent_label: "Agente",
    error_label: "Error",
};
