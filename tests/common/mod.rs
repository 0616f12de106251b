//! Shared test grammar: a small arithmetic-flavoured dialect exercising every
//! operator shape the engine supports, over whitespace-separated tokens.

use precept::{
    closed_by, pair_closed_by, BindingPower, CircumfixOp, Cursor, Dialect, DialectError, InfixOp,
    LeadingOp, Parser, PostCircumfixOp, PostfixOp, PrefixOp, TrailingOp,
};

/// Expression tree tagged with the operator symbol that built each node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Atom(String),
    Unary(&'static str, Box<Node>),
    Binary(&'static str, Box<Node>, Box<Node>),
}

impl Node {
    pub fn atom(name: &str) -> Node {
        Node::Atom(name.to_string())
    }

    pub fn unary(op: &'static str, operand: Node) -> Node {
        Node::Unary(op, Box::new(operand))
    }

    pub fn binary(op: &'static str, lhs: Node, rhs: Node) -> Node {
        Node::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    /// Render as a fully parenthesized, whitespace-separated token stream
    /// that the dialect can read back.
    pub fn print(&self) -> String {
        match self {
            Node::Atom(name) => name.clone(),
            Node::Unary("!", operand) => format!("( {} ! )", operand.print()),
            Node::Unary(op, operand) => format!("( {op} {} )", operand.print()),
            Node::Binary("[]", lhs, rhs) => {
                format!("( {} [ {} ] )", lhs.print(), rhs.print())
            }
            Node::Binary(op, lhs, rhs) => {
                format!("( {} {op} {} )", lhs.print(), rhs.print())
            }
        }
    }
}

/// Precedence table, loosest to tightest: `=` (non-associative), `+`/`-`,
/// `*`/`/`, `^` (right-associative), prefix `-`, and indexing brackets.
/// Unary minus binds tighter than every infix so that it always applies to
/// the term right after it.
pub struct Arith {
    pub implicit_product: bool,
}

impl Arith {
    pub fn new() -> Self {
        Self { implicit_product: false }
    }
}

impl Dialect for Arith {
    type Token = String;
    type Output = Node;

    fn leading_op(&self, token: &String, _cursor: &Cursor) -> Option<LeadingOp<String, Node>> {
        match token.as_str() {
            "-" => Some(LeadingOp::Prefix(PrefixOp::new(
                "-",
                BindingPower::non_assoc(60),
                |operand| Ok(Node::unary("-", operand)),
            ))),
            "(" => Some(LeadingOp::Circumfix(CircumfixOp::new(
                "()",
                closed_by(")".to_string(), Ok),
            ))),
            _ => None,
        }
    }

    fn parse_term(&self, token: String, _cursor: &Cursor) -> Result<Node, DialectError> {
        if token.chars().all(|c| c.is_alphanumeric() || c == '_') && !token.is_empty() {
            Ok(Node::Atom(token))
        } else {
            Err(format!("`{token}` is not a value").into())
        }
    }

    fn trailing_op(&self, token: &String, _cursor: &Cursor) -> Option<TrailingOp<String, Node>> {
        let infix = |op: &'static str, power| {
            TrailingOp::Infix(InfixOp::new(op, power, move |lhs, rhs| {
                Ok(Node::binary(op, lhs, rhs))
            }))
        };
        match token.as_str() {
            "=" => Some(infix("=", BindingPower::non_assoc(5))),
            "+" => Some(infix("+", BindingPower::left_assoc(10))),
            "-" => Some(infix("-", BindingPower::left_assoc(10))),
            "*" => Some(infix("*", BindingPower::left_assoc(20))),
            "/" => Some(infix("/", BindingPower::left_assoc(20))),
            "^" => Some(infix("^", BindingPower::right_assoc(30))),
            "!" => Some(TrailingOp::Postfix(PostfixOp::new(
                "!",
                BindingPower::non_assoc(50),
                |operand| Ok(Node::unary("!", operand)),
            ))),
            "[" => Some(TrailingOp::PostCircumfix(PostCircumfixOp::new(
                "[]",
                BindingPower::new(90, 91),
                pair_closed_by("]".to_string(), |lhs, rhs| Ok(Node::binary("[]", lhs, rhs))),
            ))),
            _ => None,
        }
    }

    fn juxtaposition_op(&self, _cursor: &Cursor) -> Option<InfixOp<Node>> {
        if self.implicit_product {
            Some(InfixOp::new("*", BindingPower::left_assoc(20), |lhs, rhs| {
                Ok(Node::binary("*", lhs, rhs))
            }))
        } else {
            None
        }
    }
}

pub fn arith() -> Parser<Arith> {
    Parser::new(Arith::new())
}

/// Split a formula on whitespace into owned tokens.
pub fn tokens(input: &str) -> Vec<String> {
    input.split_whitespace().map(String::from).collect()
}
