use std::{fmt::Display, path::Path, str::FromStr};

use thiserror::Error;
use tracing::{debug, trace};

use crate::{DfaError, DFA};

/// Errors that can occur when reading a DFA script. Apart from I/O errors, every variant
/// carries the (1-based) number of the offending line.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The line could not be split into a statement.
    #[error("line {line}: {message}")]
    Syntax {
        /// line number
        line: usize,
        /// description of the problem
        message: String,
    },
    /// A statement other than `alphabet` appears before the alphabet is declared.
    #[error("line {line}: the alphabet has to be declared first")]
    MissingAlphabet {
        /// line number
        line: usize,
    },
    /// The alphabet is declared more than once.
    #[error("line {line}: the alphabet is declared twice")]
    DuplicateAlphabet {
        /// line number
        line: usize,
    },
    /// A transition is labelled with something other than exactly one symbol.
    #[error("line {line}: expected a single symbol, found `{found}`")]
    NotASymbol {
        /// line number
        line: usize,
        /// the label that was found instead
        found: String,
    },
    /// Replaying the statement violates the rules for constructing a [`DFA`].
    #[error("line {line}: {source}")]
    Construction {
        /// line number
        line: usize,
        /// the underlying construction error
        #[source]
        source: DfaError,
    },
    /// The script does not contain a single statement.
    #[error("the script is empty, it has to declare at least an alphabet")]
    Empty,
    /// Reading or writing the script failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single line of a DFA script. Scripts consist of one `alphabet` statement followed by
/// statements that add states, set the initial state and add transitions, in the order in which
/// they should be replayed:
/// ```text
/// alphabet "ab"
/// state "0"
/// state "1" final
/// init "0"
/// transition "0" "a" "1"
/// ```
/// Names are always enclosed in double quotes, in which `\"` and `\\` stand for a quote and a
/// backslash. Blank lines and lines starting with `#` are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// Declares the alphabet, each character is a symbol.
    Alphabet(String),
    /// Adds a state.
    State {
        /// name of the state
        name: String,
        /// whether the state is accepting
        accepting: bool,
    },
    /// Sets the initial state.
    Init(String),
    /// Adds a transition.
    Transition {
        /// name of the source state
        source: String,
        /// the symbol
        symbol: char,
        /// name of the target state
        target: String,
    },
}

fn quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for chr in text.chars() {
        match chr {
            '"' | '\\' => {
                out.push('\\');
                out.push(chr);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(chr),
        }
    }
    out.push('"');
    out
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Statement::Alphabet(symbols) => write!(f, "alphabet {}", quoted(symbols)),
            Statement::State { name, accepting } => {
                write!(f, "state {}", quoted(name))?;
                if *accepting {
                    write!(f, " final")?;
                }
                Ok(())
            }
            Statement::Init(name) => write!(f, "init {}", quoted(name)),
            Statement::Transition {
                source,
                symbol,
                target,
            } => write!(
                f,
                "transition {} {} {}",
                quoted(source),
                quoted(&symbol.to_string()),
                quoted(target)
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Word(String),
    Quoted(String),
}

/// Splits a line into bare words and quoted strings, a `#` outside of quotes starts a comment.
/// Inside quotes `\"`, `\\`, `\n` and `\r` are recognized.
fn tokenize(line: &str) -> Result<Vec<Token>, String> {
    let mut tokens = vec![];
    let mut chars = line.chars().peekable();

    while let Some(&chr) = chars.peek() {
        match chr {
            '#' => break,
            c if c.is_whitespace() => {
                chars.next();
            }
            '"' => {
                chars.next();
                let mut content = String::new();
                loop {
                    match chars.next() {
                        None => return Err("unterminated string".to_string()),
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(escaped @ ('"' | '\\')) => content.push(escaped),
                            Some('n') => content.push('\n'),
                            Some('r') => content.push('\r'),
                            Some(other) => return Err(format!("unknown escape sequence `\\{other}`")),
                            None => return Err("unterminated string".to_string()),
                        },
                        Some(c) => content.push(c),
                    }
                }
                tokens.push(Token::Quoted(content));
            }
            _ => {
                let mut word = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() || c == '"' || c == '#' {
                        break;
                    }
                    word.push(c);
                    chars.next();
                }
                tokens.push(Token::Word(word));
            }
        }
    }
    Ok(tokens)
}

impl Statement {
    /// Parses a single line, returns `Ok(None)` for blank lines and comments. The `line` number
    /// is only used for error reporting.
    pub fn parse(text: &str, line: usize) -> Result<Option<Statement>, ScriptError> {
        use Token::{Quoted, Word};

        let syntax = |message: String| ScriptError::Syntax { line, message };
        let tokens = tokenize(text).map_err(syntax)?;
        let Some(Word(keyword)) = tokens.first() else {
            return match tokens.first() {
                None => Ok(None),
                Some(_) => Err(syntax("a statement has to start with a keyword".into())),
            };
        };

        let statement = match (keyword.as_str(), &tokens[1..]) {
            ("alphabet", [Quoted(symbols)]) => Statement::Alphabet(symbols.clone()),
            ("state", [Quoted(name)]) => Statement::State {
                name: name.clone(),
                accepting: false,
            },
            ("state", [Quoted(name), Word(flag)]) if flag == "final" => Statement::State {
                name: name.clone(),
                accepting: true,
            },
            ("init", [Quoted(name)]) => Statement::Init(name.clone()),
            ("transition", [Quoted(source), Quoted(label), Quoted(target)]) => {
                let mut symbols = label.chars();
                let (Some(symbol), None) = (symbols.next(), symbols.next()) else {
                    return Err(ScriptError::NotASymbol {
                        line,
                        found: label.clone(),
                    });
                };
                Statement::Transition {
                    source: source.clone(),
                    symbol,
                    target: target.clone(),
                }
            }
            ("alphabet" | "state" | "init" | "transition", _) => {
                return Err(syntax(format!("malformed `{keyword}` statement")))
            }
            _ => return Err(syntax(format!("unknown keyword `{keyword}`"))),
        };
        Ok(Some(statement))
    }
}

/// Wrapper that displays a [`DFA`] as a script, obtained through [`DFA::script`].
#[derive(Debug, Clone, Copy)]
pub struct Script<'a>(&'a DFA);

impl Display for Script<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dfa = self.0;
        for statement in dfa.statements() {
            // separate the sections like a hand written script would
            if matches!(statement, Statement::Init(_)) {
                writeln!(f)?;
            }
            writeln!(f, "{statement}")?;
            if matches!(statement, Statement::Init(_)) {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl DFA {
    /// Lists the statements that reconstruct `self`: the alphabet, the states in the order of
    /// their indices, the initial state (if set) and finally all transitions.
    pub fn statements(&self) -> Vec<Statement> {
        let mut statements = vec![Statement::Alphabet(self.alphabet().to_string())];
        statements.extend(self.state_indices().map(|q| Statement::State {
            name: self.name_of(q).to_string(),
            accepting: self.is_accepting(q),
        }));
        statements.extend(
            self.initial()
                .map(|q| Statement::Init(self.name_of(q).to_string())),
        );
        statements.extend(
            self.edges()
                .map(|(source, symbol, target)| Statement::Transition {
                    source: self.name_of(source).to_string(),
                    symbol,
                    target: self.name_of(target).to_string(),
                }),
        );
        statements
    }

    /// Returns a value that displays `self` as a script.
    pub fn script(&self) -> Script<'_> {
        Script(self)
    }

    /// Serializes `self` into a script, from which [`DFA::from_script`] reconstructs an equal
    /// automaton.
    ///
    /// # Example
    /// ```
    /// use dfakit::prelude::*;
    ///
    /// let dfa = DFA::builder()
    ///     .with_accepting([1])
    ///     .with_edges([(0, 'a', 1), (1, 'b', 0)])
    ///     .into_dfa(0)
    ///     .unwrap();
    /// let script = dfa.to_script();
    /// assert!(script.starts_with("alphabet \"ab\"\nstate \"0\"\nstate \"1\" final\n"));
    /// assert_eq!(DFA::from_script(&script).unwrap(), dfa);
    /// ```
    pub fn to_script(&self) -> String {
        self.script().to_string()
    }

    /// Replays the statements of a script through the construction API.
    pub fn from_script(script: &str) -> Result<DFA, ScriptError> {
        let mut dfa: Option<DFA> = None;

        for (number, text) in script.lines().enumerate() {
            let line = number + 1;
            let Some(statement) = Statement::parse(text, line)? else {
                continue;
            };
            trace!("replaying {statement}");

            let construction = |source| ScriptError::Construction { line, source };
            if let Statement::Alphabet(symbols) = &statement {
                if dfa.is_some() {
                    return Err(ScriptError::DuplicateAlphabet { line });
                }
                dfa = Some(DFA::new(symbols.as_str()));
                continue;
            }
            let Some(dfa) = dfa.as_mut() else {
                return Err(ScriptError::MissingAlphabet { line });
            };
            match statement {
                Statement::Alphabet(_) => {}
                Statement::State { name, accepting } => {
                    dfa.add_state(name, accepting).map_err(construction)?;
                }
                Statement::Init(name) => {
                    dfa.set_initial(name).map_err(construction)?;
                }
                Statement::Transition {
                    source,
                    symbol,
                    target,
                } => dfa
                    .add_transition(source, symbol, target)
                    .map_err(construction)?,
            }
        }

        let dfa = dfa.ok_or(ScriptError::Empty)?;
        debug!(
            "loaded automaton with {} states and {} transitions",
            dfa.size(),
            dfa.transition_count()
        );
        Ok(dfa)
    }

    /// Writes the script of `self` to the file at `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ScriptError> {
        std::fs::write(path.as_ref(), self.to_script())?;
        debug!("saved automaton to {}", path.as_ref().display());
        Ok(())
    }

    /// Reads an automaton from the script in the file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<DFA, ScriptError> {
        let script = std::fs::read_to_string(path.as_ref())?;
        debug!("loading automaton from {}", path.as_ref().display());
        Self::from_script(&script)
    }
}

impl FromStr for DFA {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DFA::from_script(s)
    }
}
