use std::fmt::Display;

use indexmap::IndexMap;
use itertools::Itertools;

use crate::{automaton::StateIndex, DFA};

/// Options that influence the DOT representation of an automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotOptions {
    /// Name of the graph, `Graph01` by default.
    pub name: String,
    /// If set, all transitions between the same pair of states are merged into a single edge,
    /// whose label lists the symbols in sorted order.
    pub group: bool,
}

impl Default for DotOptions {
    fn default() -> Self {
        Self {
            name: "Graph01".to_string(),
            group: false,
        }
    }
}

impl DotOptions {
    /// Default options with the given graph name.
    pub fn named<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets whether parallel transitions are grouped.
    pub fn grouped(mut self, group: bool) -> Self {
        self.group = group;
        self
    }
}

/// Escapes a string so that it can be placed between double quotes in a DOT file.
fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for chr in text.chars() {
        if chr == '"' || chr == '\\' {
            out.push('\\');
        }
        out.push(chr);
    }
    out.push('"');
    out
}

/// Implementors can be turned into a graph in the DOT language, for more information on the
/// format see the [graphviz documentation](https://graphviz.org/doc/info/lang.html).
pub trait Dottable {
    /// Iterates over the states that are turned into nodes.
    fn dot_states(&self) -> impl Iterator<Item = StateIndex> + '_;

    /// The state that receives the initial arrow, if any.
    fn dot_initial(&self) -> Option<StateIndex>;

    /// The identifier of the node for a state, it must be a valid DOT identifier.
    fn dot_state_ident(&self, idx: StateIndex) -> String {
        format!("Q_{idx}")
    }

    /// Attributes of the node representing `idx`.
    fn dot_state_attributes(&self, idx: StateIndex) -> Vec<DotStateAttribute>;

    /// The edges between states as triples of source, target and attributes.
    fn dot_transitions(
        &self,
        group: bool,
    ) -> Vec<(StateIndex, StateIndex, Vec<DotTransitionAttribute>)>;

    /// Compute the graphviz representation with default [`DotOptions`].
    fn dot_representation(&self) -> String {
        self.dot_with_options(&DotOptions::default())
    }

    /// Compute the graphviz representation with the given options.
    fn dot_with_options(&self, options: &DotOptions) -> String {
        let states = self.dot_states().collect_vec();
        let mut lines = vec![
            format!("digraph {} {{", options.name),
            "    rankdir=\"LR\";".to_string(),
            String::new(),
            format!("    // States ({})", states.len()),
            "    node [shape = point ];     __Qi__ // Initial state".to_string(),
        ];
        lines.extend(states.iter().map(|&q| {
            format!(
                "    {} [{}];",
                self.dot_state_ident(q),
                self.dot_state_attributes(q).iter().join(", ")
            )
        }));

        lines.push(String::new());
        lines.push("    // Transitions".to_string());
        if let Some(initial) = self.dot_initial() {
            lines.push(format!(
                "    __Qi__ -> {}; // Initial state arrow",
                self.dot_state_ident(initial)
            ));
        }
        lines.extend(
            self.dot_transitions(options.group)
                .into_iter()
                .map(|(source, target, attributes)| {
                    format!(
                        "    {} -> {} [{}];",
                        self.dot_state_ident(source),
                        self.dot_state_ident(target),
                        attributes.iter().join(", ")
                    )
                }),
        );
        lines.push("}".to_string());
        lines.join("\n") + "\n"
    }

    /// Renders the object visually in the given format and returns the bytes of the image.
    /// This method is only available on the `graphviz` crate feature.
    #[cfg(feature = "graphviz")]
    fn render(&self, format: ImageFormat) -> Result<Vec<u8>, RenderError> {
        render_dot(&self.dot_representation(), format)
    }

    /// Attempts to render the object to a file at `path`. This method is only available on the
    /// `graphviz` crate feature and makes use of temporary files.
    #[cfg(feature = "graphviz")]
    fn render_to_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
        format: ImageFormat,
    ) -> Result<(), RenderError> {
        render_dot_to_file(&self.dot_representation(), path, format)
    }

    /// First creates a rendered PNG using [`Self::render()`], after which the rendered
    /// image is displayed via by using a locally installed image viewer.
    /// This method is only available on the `graphviz` crate feature.
    ///
    /// # Image viewer
    /// On Macos, the Preview app is used, while on Linux and Windows, the image viewer
    /// can be configured by setting the `IMAGE_VIEWER` environment variable. If it is not set,
    /// then the display command of ImageMagick will be used.
    #[cfg(feature = "graphviz")]
    fn display_rendered(&self) -> Result<(), RenderError> {
        display_png(self.render(ImageFormat::Png)?)
    }
}

impl Dottable for DFA {
    fn dot_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.state_indices()
    }

    fn dot_initial(&self) -> Option<StateIndex> {
        self.initial()
    }

    fn dot_state_attributes(&self, idx: StateIndex) -> Vec<DotStateAttribute> {
        let shape = if self.is_accepting(idx) {
            "doublecircle"
        } else {
            "circle"
        };
        vec![
            DotStateAttribute::Shape(shape.into()),
            DotStateAttribute::Label(self.name_of(idx).to_string()),
        ]
    }

    fn dot_transitions(
        &self,
        group: bool,
    ) -> Vec<(StateIndex, StateIndex, Vec<DotTransitionAttribute>)> {
        if !group {
            return self
                .edges()
                .map(|(source, symbol, target)| {
                    (
                        source,
                        target,
                        vec![DotTransitionAttribute::Label(symbol.to_string())],
                    )
                })
                .collect();
        }

        self.state_indices()
            .flat_map(|source| {
                let mut by_target: IndexMap<StateIndex, Vec<char>> = IndexMap::new();
                for (symbol, target) in self.edges_from(source) {
                    by_target.entry(target).or_default().push(symbol);
                }
                by_target.into_iter().map(move |(target, mut symbols)| {
                    symbols.sort_unstable();
                    (
                        source,
                        target,
                        vec![DotTransitionAttribute::Label(symbols.iter().join(", "))],
                    )
                })
            })
            .collect()
    }
}

/// Enum that abstracts attributes in the DOT format.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DotStateAttribute {
    /// The label of a node
    Label(String),
    /// The shape of a node
    Shape(String),
}

impl Display for DotStateAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DotStateAttribute::Label(s) => write!(f, "label={}", quote(s)),
            DotStateAttribute::Shape(s) => write!(f, "shape={}", quote(s)),
        }
    }
}

/// Attributes of an edge in the DOT format.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DotTransitionAttribute {
    /// The label of an edge
    Label(String),
}

impl Display for DotTransitionAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DotTransitionAttribute::Label(lbl) => write!(f, "label={}", quote(lbl)),
        }
    }
}

#[cfg(feature = "graphviz")]
pub use render::{display_dot, render_dot, render_dot_to_file, ImageFormat, RenderError};

#[cfg(feature = "graphviz")]
mod render {
    use std::{
        io::Write,
        path::Path,
        process::{Command, Stdio},
        str::FromStr,
    };

    use thiserror::Error;
    use tracing::{error, trace};

    /// The image formats that `dot` is asked to produce.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum ImageFormat {
        /// Portable network graphics
        #[default]
        Png,
        /// Portable document format
        Pdf,
        /// Scalable vector graphics
        Svg,
    }

    impl ImageFormat {
        /// The usual file extension, which is also the name `dot` uses for the format.
        pub fn extension(&self) -> &'static str {
            match self {
                ImageFormat::Png => "png",
                ImageFormat::Pdf => "pdf",
                ImageFormat::Svg => "svg",
            }
        }

        /// Guesses the format from the extension of `path`.
        pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
            path.as_ref()
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(|ext| ext.parse().ok())
        }

        fn flag(&self) -> String {
            format!("-T{}", self.extension())
        }
    }

    impl FromStr for ImageFormat {
        type Err = RenderError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s.to_ascii_lowercase().as_str() {
                "png" => Ok(ImageFormat::Png),
                "pdf" => Ok(ImageFormat::Pdf),
                "svg" => Ok(ImageFormat::Svg),
                _ => Err(RenderError::UnknownFormat(s.to_string())),
            }
        }
    }

    impl std::fmt::Display for ImageFormat {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.extension())
        }
    }

    /// Errors that can occur while handing a DOT representation to graphviz or an image viewer.
    #[derive(Debug, Error)]
    pub enum RenderError {
        /// Reading, writing or spawning a process failed.
        #[error("I/O error during rendering: {0}")]
        Io(#[from] std::io::Error),
        /// `dot` ran but reported a failure.
        #[error("dot exited with {status}: {stderr}")]
        Dot {
            /// exit status of the process
            status: std::process::ExitStatus,
            /// what the process wrote to stderr
            stderr: String,
        },
        /// The requested image format is not supported.
        #[error("unknown image format `{0}`, expected one of png, pdf or svg")]
        UnknownFormat(String),
        /// No image viewer is known for the current platform.
        #[error("displaying images is not supported on this platform")]
        UnsupportedPlatform,
    }

    /// The graphviz executable, `dot` unless overridden through `DFAKIT_DOT`.
    fn dot_command() -> Command {
        let program = std::env::var("DFAKIT_DOT").unwrap_or_else(|_| "dot".to_string());
        trace!("using {program} for rendering");
        Command::new(program)
    }

    fn check(output: std::process::Output) -> Result<Vec<u8>, RenderError> {
        if output.status.success() {
            return Ok(output.stdout);
        }
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        error!("could not render, dot reported\n{stderr}");
        Err(RenderError::Dot {
            status: output.status,
            stderr,
        })
    }

    /// Pipes the given DOT representation into `dot` and returns the rendered image.
    pub fn render_dot(dot: &str, format: ImageFormat) -> Result<Vec<u8>, RenderError> {
        trace!("rendering dot representation as {format}\n{dot}");
        let mut child = dot_command()
            .arg(format.flag())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(dot.as_bytes())?;
        }
        check(child.wait_with_output()?)
    }

    /// Renders the given DOT representation into the file at `path`. The representation is
    /// first written to a temporary file, which `dot` then reads.
    pub fn render_dot_to_file<P: AsRef<Path>>(
        dot: &str,
        path: P,
        format: ImageFormat,
    ) -> Result<(), RenderError> {
        let mut tempfile = tempfile::NamedTempFile::new()?;
        tempfile.write_all(dot.as_bytes())?;
        tempfile.flush()?;

        trace!(
            "rendering {} to {}",
            tempfile.path().display(),
            path.as_ref().display()
        );
        let output = dot_command()
            .arg(format.flag())
            .arg("-o")
            .arg(path.as_ref())
            .arg(tempfile.path())
            .output()?;
        check(output).map(|_| ())
    }

    /// Renders the given dot string to a png file and displays it using the default
    /// image viewer on the system.
    pub fn display_dot(dot: &str) -> Result<(), RenderError> {
        super::display_png(render_dot(dot, ImageFormat::Png)?)
    }
}

/// Displays a png given as a vector of bytes by calling an image viewer.
/// On Macos, that is the Preview app, while on Linux and Windows this can be configured by
/// setting the IMAGE_VIEWER environment variable. If it is not set, then the display command
/// of ImageMagick will be used.
#[cfg(feature = "graphviz")]
fn display_png(contents: Vec<u8>) -> Result<(), RenderError> {
    use std::{
        io::Write,
        process::{Command, Stdio},
    };

    use tracing::{error, trace};

    let mut command = if cfg!(target_os = "linux") || cfg!(target_os = "windows") {
        let image_viewer = std::env::var("IMAGE_VIEWER").unwrap_or("display".to_string());
        Command::new(image_viewer)
    } else if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg("-a").arg("Preview.app").arg("-f");
        command
    } else {
        return Err(RenderError::UnsupportedPlatform);
    };

    let mut child = command.stdin(Stdio::piped()).spawn()?;
    let Some(mut stdin) = child.stdin.take() else {
        return Ok(());
    };
    std::thread::spawn(move || {
        if let Err(e) = stdin.write_all(&contents) {
            error!("could not pass image to viewer: {e}");
        }
        drop(stdin);
        match child.wait_with_output() {
            Ok(output) => trace!("png display command exited with {}", output.status),
            Err(e) => error!("error in display child process: {e}"),
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn even_as() -> DFA {
        DFA::builder()
            .with_accepting(["even"])
            .with_edges([
                ("even", 'a', "odd"),
                ("even", 'b', "even"),
                ("even", 'c', "even"),
                ("odd", 'a', "even"),
                ("odd", 'c', "odd"),
                ("odd", 'b', "odd"),
            ])
            .into_dfa("even")
            .unwrap()
    }

    #[test]
    fn dot_lists_states_and_transitions() {
        let dot = even_as().dot_representation();
        assert!(dot.starts_with("digraph Graph01 {\n    rankdir=\"LR\";\n"));
        assert!(dot.contains("    // States (2)\n"));
        assert!(dot.contains("    Q_0 [shape=\"doublecircle\", label=\"even\"];\n"));
        assert!(dot.contains("    Q_1 [shape=\"circle\", label=\"odd\"];\n"));
        assert!(dot.contains("    __Qi__ -> Q_0; // Initial state arrow\n"));
        assert!(dot.contains("    Q_0 -> Q_1 [label=\"a\"];\n"));
        assert_eq!(dot.matches(" -> ").count(), 7);
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn grouped_labels_are_sorted() {
        let dot = even_as().dot_with_options(&DotOptions::named("Parity").grouped(true));
        assert!(dot.starts_with("digraph Parity {"));
        assert!(dot.contains("    Q_0 -> Q_0 [label=\"b, c\"];\n"));
        assert!(dot.contains("    Q_1 -> Q_1 [label=\"b, c\"];\n"));
        assert!(dot.contains("    Q_1 -> Q_0 [label=\"a\"];\n"));
        assert_eq!(dot.matches(" -> ").count(), 5);
    }

    #[test]
    fn labels_are_escaped_and_initial_arrow_is_optional() {
        let mut dfa = DFA::new("\"");
        let q = dfa.add_state("say \"hi\"", false).unwrap();
        dfa.add_transition(q, '"', q).unwrap();
        let dot = dfa.dot_representation();
        assert!(dot.contains("label=\"say \\\"hi\\\"\""));
        assert!(dot.contains("Q_0 -> Q_0 [label=\"\\\"\"]"));
        assert!(!dot.contains("__Qi__ ->"));
    }

    #[cfg(feature = "graphviz")]
    #[test]
    fn state_attributes() {
        use crate::transition_system::dot::DotStateAttribute;

        let dfa = even_as();
        assert_eq!(
            dfa.dot_state_attributes(0),
            vec![
                DotStateAttribute::Shape("doublecircle".into()),
                DotStateAttribute::Label("even".into()),
            ]
        );
        assert_eq!(
            dfa.dot_state_attributes(1)
                .iter()
                .map(|attribute| attribute.to_string())
                .collect::<Vec<_>>(),
            vec![
                r#"shape="circle""#.to_string(),
                r#"label="odd""#.to_string(),
            ]
        );
    }

    #[test]
    fn image_formats() {
        use crate::transition_system::dot::ImageFormat;

        assert_eq!("PDF".parse::<ImageFormat>().unwrap(), ImageFormat::Pdf);
        assert!("gif".parse::<ImageFormat>().is_err());
        assert_eq!(ImageFormat::from_path("out/graph.svg"), Some(ImageFormat::Svg));
        assert_eq!(ImageFormat::from_path("graph"), None);
    }

    #[cfg(feature = "graphviz")]
    #[test_log::test]
    #[ignore]
    fn render_dfa() {
        use crate::transition_system::dot::ImageFormat;

        let dfa = even_as();
        let png = dfa.render(ImageFormat::Png).unwrap();
        assert!(!png.is_empty());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("even.svg");
        dfa.render_to_file(&path, ImageFormat::Svg).unwrap();
        assert!(path.exists());
    }
}
