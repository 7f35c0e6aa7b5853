// PDF export: compiles caller-supplied LaTeX with an external tectonic binary.
// Every job runs in its own scratch directory; nothing is shared between jobs.

pub mod compiler;
pub mod handlers;

pub use compiler::LatexCompiler;
