//! JSON streaming parser implementation
//!
//! The parser is strict RFC 8259: one value per document, commas required
//! between entries and forbidden before a closing bracket. Duplicate object
//! keys are accepted with last-occurrence-wins, the behavior callers get
//! from single-literal parsing.

use crate::error::{Error, ErrorKind, Result, Span};
use crate::json::event::Event;
use crate::lexer::json::JsonLexer;
use crate::lexer::{Token, TokenKind};
use crate::value::{Array, Object, Value};

/// Configuration for the JSON parser
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Maximum nesting depth (0 means unlimited)
    pub max_depth: u16,
    /// Maximum input size in bytes (0 means unlimited)
    pub max_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: 128,
            max_size: 10 * 1024 * 1024, // 10 MB default
        }
    }
}

impl Config {
    /// Create a new config with unlimited depth and size
    pub const fn unlimited() -> Self {
        Self {
            max_depth: 0,
            max_size: 0,
        }
    }

    /// Create a new config with specific limits
    pub const fn new(max_depth: u16, max_size: usize) -> Self {
        Self {
            max_depth,
            max_size,
        }
    }
}

/// Kind of open container
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ContainerContext {
    Object,
    Array,
}

/// What the current container expects next
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SlotState {
    /// Right after the opening bracket: first entry or immediate close
    FirstEntry,
    /// A key must follow (a close here would be a trailing comma)
    KeyRequired,
    /// ':' must follow an object key
    ColonRequired,
    /// A value must follow (a close here would be a trailing comma)
    ValueRequired,
    /// ',' or the container close
    SeparatorOrEnd,
}

/// One open container on the parse stack
#[derive(Clone, Copy, Debug)]
struct Frame {
    container: ContainerContext,
    slot: SlotState,
}

/// Node under construction while folding events into a `Value`
#[derive(Debug)]
enum Node {
    Object {
        object: Object,
        pending_key: Option<String>,
    },
    Array(Array),
}

/// Streaming JSON parser with depth and size limits
#[derive(Debug)]
pub struct Parser<'a> {
    lexer: JsonLexer<'a>,
    config: Config,
    depth: u16,
    bytes_parsed: usize,
    frames: Vec<Frame>,
    /// The root value has been fully consumed; only EOF may follow
    root_done: bool,
}

impl<'a> Parser<'a> {
    /// Create a new parser with default configuration
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_config(input, Config::default())
    }

    /// Create a new parser with custom configuration
    pub fn with_config(input: &'a [u8], config: Config) -> Self {
        Self {
            lexer: JsonLexer::new(input),
            config,
            depth: 0,
            bytes_parsed: 0,
            frames: Vec::new(),
            root_done: false,
        }
    }

    /// Get the next event from the parser
    pub fn next_event(&mut self) -> Result<Option<Event>> {
        if self.config.max_size > 0 && self.bytes_parsed >= self.config.max_size {
            return Err(Error::at(
                ErrorKind::MaxSizeExceeded {
                    max: self.config.max_size,
                },
                self.bytes_parsed,
                0,
                0,
            ));
        }

        let token = self.lexer.next_token()?;

        let span = token.span;
        let token_len = span.end.offset.saturating_sub(span.start.offset);
        self.bytes_parsed = self.bytes_parsed.saturating_add(token_len);

        if self.config.max_size > 0 && self.bytes_parsed > self.config.max_size {
            return Err(Error::at(
                ErrorKind::MaxSizeExceeded {
                    max: self.config.max_size,
                },
                self.bytes_parsed,
                0,
                0,
            ));
        }

        match self.frames.last().map(|frame| frame.container) {
            None => self.handle_root(token),
            Some(ContainerContext::Object) => self.handle_in_object(token),
            Some(ContainerContext::Array) => self.handle_in_array(token),
        }
    }

    /// Parse the next complete value from the event stream
    ///
    /// Stops right after the value; trailing input is left unread. Use
    /// [`parse_document`](Self::parse_document) for whole-input parsing.
    pub fn parse_value(&mut self) -> Result<Value> {
        let mut stack: Vec<Node> = Vec::new();

        while let Some(event) = self.next_event()? {
            let completed = match event {
                Event::ObjectStart => {
                    stack.push(Node::Object {
                        object: Object::new(),
                        pending_key: None,
                    });
                    None
                }
                Event::ArrayStart => {
                    stack.push(Node::Array(Array::new()));
                    None
                }
                Event::ObjectEnd => match stack.pop() {
                    Some(Node::Object { object, .. }) => Some(Value::Object(object)),
                    _ => return Err(self.error(ErrorKind::InvalidToken)),
                },
                Event::ArrayEnd => match stack.pop() {
                    Some(Node::Array(array)) => Some(Value::Array(array)),
                    _ => return Err(self.error(ErrorKind::InvalidToken)),
                },
                Event::Key(key) => {
                    match stack.last_mut() {
                        Some(Node::Object { pending_key, .. }) => *pending_key = Some(key),
                        _ => return Err(self.error(ErrorKind::InvalidToken)),
                    }
                    None
                }
                Event::Value(value) => Some(value),
            };

            if let Some(value) = completed {
                match stack.last_mut() {
                    None => return Ok(value),
                    Some(Node::Object {
                        object,
                        pending_key,
                    }) => {
                        let Some(key) = pending_key.take() else {
                            return Err(self.error(ErrorKind::InvalidToken));
                        };
                        // Last occurrence wins on duplicate keys
                        object.insert(key, value);
                    }
                    Some(Node::Array(array)) => array.push(value),
                }
            }
        }

        Err(self.error(ErrorKind::InvalidToken))
    }

    /// Parse exactly one value spanning the whole input
    ///
    /// Anything but whitespace after the root value is an error. This is
    /// the `JSON.parse` contract the line validator relies on.
    pub fn parse_document(&mut self) -> Result<Value> {
        let value = self.parse_value()?;
        match self.next_event()? {
            None => Ok(value),
            Some(_) => Err(self.error(ErrorKind::TrailingCharacters)),
        }
    }

    // Token handlers, one per container context

    fn handle_root(&mut self, token: Token) -> Result<Option<Event>> {
        if self.root_done {
            return match token.kind {
                TokenKind::Eof => Ok(None),
                _ => Err(Self::token_error(ErrorKind::TrailingCharacters, &token)),
            };
        }

        match token.kind {
            TokenKind::LeftBrace => self.open_container(ContainerContext::Object, &token),
            TokenKind::LeftBracket => self.open_container(ContainerContext::Array, &token),
            TokenKind::Null => {
                self.root_done = true;
                Ok(Some(Event::Value(Value::Null)))
            }
            TokenKind::True => {
                self.root_done = true;
                Ok(Some(Event::Value(Value::Bool(true))))
            }
            TokenKind::False => {
                self.root_done = true;
                Ok(Some(Event::Value(Value::Bool(false))))
            }
            TokenKind::String(s) => {
                self.root_done = true;
                Ok(Some(Event::Value(Value::String(s))))
            }
            TokenKind::Number(n) => {
                self.root_done = true;
                Ok(Some(Event::Value(Value::Number(n))))
            }
            _ => Err(Self::expected_error("value", &token)),
        }
    }

    fn handle_in_object(&mut self, token: Token) -> Result<Option<Event>> {
        let span = token.span;
        let slot = self.current_slot();
        match slot {
            SlotState::FirstEntry => match token.kind {
                TokenKind::RightBrace => {
                    self.close_container();
                    Ok(Some(Event::ObjectEnd))
                }
                TokenKind::String(s) => {
                    self.set_slot(SlotState::ColonRequired);
                    Ok(Some(Event::Key(s)))
                }
                _ => Err(Self::expected_error("string key or '}'", &token)),
            },
            SlotState::KeyRequired => match token.kind {
                TokenKind::String(s) => {
                    self.set_slot(SlotState::ColonRequired);
                    Ok(Some(Event::Key(s)))
                }
                TokenKind::RightBrace => {
                    Err(Self::token_error(ErrorKind::TrailingComma, &token))
                }
                _ => Err(Self::expected_error("string key", &token)),
            },
            SlotState::ColonRequired => match token.kind {
                TokenKind::Colon => {
                    self.set_slot(SlotState::ValueRequired);
                    self.next_event()
                }
                _ => Err(Self::expected_error("':'", &token)),
            },
            SlotState::ValueRequired => self.parse_value_token(token),
            SlotState::SeparatorOrEnd => match token.kind {
                TokenKind::Comma => {
                    self.set_slot(SlotState::KeyRequired);
                    self.next_event()
                }
                TokenKind::RightBrace => {
                    self.close_container();
                    Ok(Some(Event::ObjectEnd))
                }
                kind if kind.is_value() => Err(Self::span_error(ErrorKind::MissingComma, span)),
                _ => Err(Self::expected_error("',' or '}'", &token)),
            },
        }
    }

    fn handle_in_array(&mut self, token: Token) -> Result<Option<Event>> {
        let span = token.span;
        let slot = self.current_slot();
        match slot {
            SlotState::FirstEntry => match token.kind {
                TokenKind::RightBracket => {
                    self.close_container();
                    Ok(Some(Event::ArrayEnd))
                }
                _ => self.parse_value_token(token),
            },
            SlotState::ValueRequired => match token.kind {
                TokenKind::RightBracket => {
                    Err(Self::token_error(ErrorKind::TrailingComma, &token))
                }
                _ => self.parse_value_token(token),
            },
            SlotState::SeparatorOrEnd => match token.kind {
                TokenKind::Comma => {
                    self.set_slot(SlotState::ValueRequired);
                    self.next_event()
                }
                TokenKind::RightBracket => {
                    self.close_container();
                    Ok(Some(Event::ArrayEnd))
                }
                kind if kind.is_value() => Err(Self::span_error(ErrorKind::MissingComma, span)),
                _ => Err(Self::expected_error("',' or ']'", &token)),
            },
            // Key and colon states never arise inside arrays
            SlotState::KeyRequired | SlotState::ColonRequired => {
                Err(Self::expected_error("value", &token))
            }
        }
    }

    /// Consume a token in value position
    fn parse_value_token(&mut self, token: Token) -> Result<Option<Event>> {
        match token.kind {
            TokenKind::LeftBrace => self.open_container(ContainerContext::Object, &token),
            TokenKind::LeftBracket => self.open_container(ContainerContext::Array, &token),
            TokenKind::Null => {
                self.set_slot(SlotState::SeparatorOrEnd);
                Ok(Some(Event::Value(Value::Null)))
            }
            TokenKind::True => {
                self.set_slot(SlotState::SeparatorOrEnd);
                Ok(Some(Event::Value(Value::Bool(true))))
            }
            TokenKind::False => {
                self.set_slot(SlotState::SeparatorOrEnd);
                Ok(Some(Event::Value(Value::Bool(false))))
            }
            TokenKind::String(s) => {
                self.set_slot(SlotState::SeparatorOrEnd);
                Ok(Some(Event::Value(Value::String(s))))
            }
            TokenKind::Number(n) => {
                self.set_slot(SlotState::SeparatorOrEnd);
                Ok(Some(Event::Value(Value::Number(n))))
            }
            _ => Err(Self::expected_error("value", &token)),
        }
    }

    fn open_container(
        &mut self,
        container: ContainerContext,
        token: &Token,
    ) -> Result<Option<Event>> {
        self.increment_depth(token)?;
        // Once this container closes, the parent resumes at its separator
        self.set_slot(SlotState::SeparatorOrEnd);
        self.frames.push(Frame {
            container,
            slot: SlotState::FirstEntry,
        });
        match container {
            ContainerContext::Object => Ok(Some(Event::ObjectStart)),
            ContainerContext::Array => Ok(Some(Event::ArrayStart)),
        }
    }

    fn close_container(&mut self) {
        self.frames.pop();
        self.depth = self.depth.saturating_sub(1);
        if self.frames.is_empty() {
            self.root_done = true;
        }
    }

    fn current_slot(&self) -> SlotState {
        self.frames
            .last()
            .map_or(SlotState::FirstEntry, |frame| frame.slot)
    }

    fn set_slot(&mut self, slot: SlotState) {
        if let Some(frame) = self.frames.last_mut() {
            frame.slot = slot;
        }
    }

    fn increment_depth(&mut self, token: &Token) -> Result<()> {
        if self.config.max_depth > 0 && self.depth >= self.config.max_depth {
            return Err(Self::token_error(
                ErrorKind::MaxDepthExceeded {
                    max: self.config.max_depth,
                },
                token,
            ));
        }
        self.depth = self.depth.saturating_add(1);
        Ok(())
    }

    fn error(&self, kind: ErrorKind) -> Error {
        Error::at(kind, self.bytes_parsed, 0, 0)
    }

    fn token_error(kind: ErrorKind, token: &Token) -> Error {
        Self::span_error(kind, token.span)
    }

    fn span_error(kind: ErrorKind, span: Span) -> Error {
        Error::at(kind, span.start.offset, span.start.line, span.start.col)
    }

    fn expected_error(expected: &str, token: &Token) -> Error {
        let found = token.kind.name();
        Self::token_error(
            ErrorKind::Expected {
                expected: expected.to_string(),
                found: found.to_string(),
            },
            token,
        )
    }
}
