//! Chat events, recognized commands, and the chat-transport contract.

use std::error::Error;
use std::fmt::{Display, Formatter};

use rcommon::{BoxFuture, ChatId, ModelId};

/// An uploaded attachment as the transport announces it: a declared byte
/// size and a fetchable content location. Nothing is downloaded until the
/// size passes the cap check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub size: u64,
    pub url: String,
}

impl DocumentRef {
    pub fn new(size: u64, url: impl Into<String>) -> Self {
        Self {
            size,
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventBody {
    Text(String),
    Document(DocumentRef),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingEvent {
    pub chat: ChatId,
    pub body: EventBody,
}

impl IncomingEvent {
    pub fn text(chat: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat,
            body: EventBody::Text(text.into()),
        }
    }

    pub fn document(chat: ChatId, document: DocumentRef) -> Self {
        Self {
            chat,
            body: EventBody::Document(document),
        }
    }
}

/// Top-level commands. The id-carrying forms require exactly one decimal
/// argument; anything else is not a command and falls through the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    GetModelsList,
    GetAvailableClasses,
    GetAvailableParams,
    Train,
    Retrain(ModelId),
    Delete(ModelId),
    Predict(ModelId),
    Exit,
}

impl Command {
    pub fn parse(text: &str) -> Option<Self> {
        let mut tokens = text.trim().split_whitespace();
        let verb = tokens.next()?;
        let argument = tokens.next();
        if tokens.next().is_some() {
            return None;
        }

        match (verb, argument) {
            ("/start", None) => Some(Self::Start),
            ("/help", None) => Some(Self::Help),
            ("/get_models_list", None) => Some(Self::GetModelsList),
            ("/get_available_classes", None) => Some(Self::GetAvailableClasses),
            ("/get_available_params", None) => Some(Self::GetAvailableParams),
            ("/train", None) => Some(Self::Train),
            ("/exit", None) => Some(Self::Exit),
            ("/retrain", Some(id)) => parse_id(id).map(Self::Retrain),
            ("/delete", Some(id)) => parse_id(id).map(Self::Delete),
            ("/predict", Some(id)) => parse_id(id).map(Self::Predict),
            _ => None,
        }
    }
}

fn parse_id(token: &str) -> Option<ModelId> {
    if !token.is_empty() && token.bytes().all(|byte| byte.is_ascii_digit()) {
        return Some(ModelId::from(token));
    }

    None
}

/// Outbound chat-transport failure (or a failed document fetch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "chat transport: {}", self.message)
    }
}

impl Error for TransportError {}

/// The chat transport as the engine consumes it. `send_choices` renders a
/// picker for a non-empty choice list and clears any visible picker for an
/// empty one.
pub trait ChatTransport: Send + Sync {
    fn send_text<'a>(
        &'a self,
        chat: ChatId,
        text: &'a str,
    ) -> BoxFuture<'a, Result<(), TransportError>>;

    fn send_choices<'a>(
        &'a self,
        chat: ChatId,
        text: &'a str,
        choices: &'a [String],
    ) -> BoxFuture<'a, Result<(), TransportError>>;

    fn send_document<'a>(
        &'a self,
        chat: ChatId,
        file_name: &'a str,
        bytes: Vec<u8>,
        caption: &'a str,
    ) -> BoxFuture<'a, Result<(), TransportError>>;

    fn fetch_document<'a>(
        &'a self,
        document: &'a DocumentRef,
    ) -> BoxFuture<'a, Result<Vec<u8>, TransportError>>;
}
