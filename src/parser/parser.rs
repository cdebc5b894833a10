//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the entry production.
//! Every production follows the same discipline: `enter_node` allocates the
//! node at the current token's location, links it under the node on top of
//! the construction stack and pushes it; `exit_node` pops it again. Tree shape
//! therefore mirrors the call-stack nesting of the productions exactly.

use tracing::{debug, trace};

use crate::{
    ast::{
        ast::{Ast, NodeId},
        nodes::{NodeKind, NodeType},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{
        stream::{TokenSource, TokenStream},
        tokens::{Token, TokenKind},
    },
};

use super::stmt::parse_fct_def;

/// The main parser structure that maintains parsing state.
///
/// Owns the token cursor and the construction stack for exactly one
/// translation unit; parsers share nothing with each other.
pub struct Parser {
    /// Token cursor, only ever inspected one token ahead
    source: Box<dyn TokenSource>,
    /// The tree under construction
    ast: Ast,
    /// Nodes whose production has begun but not yet finished
    parent_stack: Vec<NodeId>,
}

impl Parser {
    pub fn new(source: impl TokenSource + 'static) -> Self {
        Parser {
            source: Box::new(source),
            ast: Ast::new(),
            parent_stack: vec![],
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        self.source.current_token()
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.source.current_kind()
    }

    pub fn advance(&mut self) {
        self.source.advance();
    }

    /// Consumes a token of the given kind or fails with a syntax error.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, Error> {
        self.source.expect(kind)
    }

    pub fn expect_one_of(&mut self, kinds: &[TokenKind]) -> Result<Token, Error> {
        self.source.expect_one_of(kinds)
    }

    pub fn is_eof(&self) -> bool {
        self.source.is_eof()
    }

    /// Whether the current token begins the given production.
    pub fn at(&self, node_type: NodeType) -> bool {
        node_type.begins_with(self.current_token_kind())
    }

    /// Number of productions currently open.
    pub fn depth(&self) -> usize {
        self.parent_stack.len()
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    /// Replaces a node's payload once its production has learned its fields.
    pub(super) fn set_kind(&mut self, node: NodeId, kind: NodeKind) {
        debug_assert_eq!(self.ast.node_type(node), kind.node_type());
        self.ast[node].kind = kind;
    }

    pub(super) fn enter_node(&mut self, kind: NodeKind) -> NodeId {
        let location = self.current_token().location;
        let parent = self.parent_stack.last().copied();
        let node = self.ast.add_node(kind, location, parent);

        self.parent_stack.push(node);
        trace!(
            node = %self.ast.node_type(node),
            %location,
            depth = self.parent_stack.len(),
            "enter"
        );
        node
    }

    pub(super) fn exit_node(&mut self, node: NodeId) {
        match self.parent_stack.last() {
            Some(top) if *top == node => {
                self.parent_stack.pop();
            }
            top => panic!(
                "structural invariant violation: exiting node {} ({}) but the top of the construction stack is {:?}",
                node.index(),
                self.ast.node_type(node),
                top.map(|id| id.index())
            ),
        }

        trace!(node = %self.ast.node_type(node), depth = self.parent_stack.len(), "exit");
    }

    /// Parses one translation unit: one or more function definitions up to end of input.
    pub fn parse(mut self) -> Result<Ast, Error> {
        let node = self.enter_node(NodeKind::Entry);

        if !self.at(NodeType::FunctionDef) {
            let token = self.current_token();
            return Err(Error::new(
                ErrorImpl::MissingFunctionDef { found: token.kind },
                token.location,
            ));
        }

        loop {
            parse_fct_def(&mut self)?;
            if self.is_eof() {
                break;
            }
        }

        self.exit_node(node);
        assert!(
            self.parent_stack.is_empty(),
            "structural invariant violation: {} nodes left on the construction stack",
            self.parent_stack.len()
        );

        debug!(nodes = self.ast.len(), "parsed translation unit");
        Ok(self.ast)
    }
}

/// Parses a stream of tokens into an Abstract Syntax Tree.
///
/// This is the main entry point for parsing. No partial tree is returned on
/// failure: the first syntax error aborts the parse.
///
/// # Arguments
///
/// * `tokens` - Vector of tokens to parse, normally ending in `TOK_EOF`
///
/// # Returns
///
/// The tree rooted at the `Entry` node, or the first syntax error.
pub fn parse(tokens: Vec<Token>) -> Result<Ast, Error> {
    Parser::new(TokenStream::new(tokens)).parse()
}
