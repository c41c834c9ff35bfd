//! Placeholder templates, value trees and strict rendering.
//!
//! A template is plain text with `{{dotted.path}}` placeholders. Rendering
//! substitutes every placeholder with the scalar found at that path in a
//! [`ValueTree`]; a single missing path fails the whole render.
//!
//! ```
//! use render_template::{Template, ValueTree};
//! use serde_json::json;
//!
//! let template = Template::parse("smtp.conf", "relay = {{postfix.connect.host}}:{{postfix.connect.port}}\n").unwrap();
//! let tree = ValueTree::from_value(json!({
//!     "postfix": {"connect": {"host": "mail.local", "port": 25}}
//! }));
//!
//! let rendered = template.render(&tree).unwrap();
//! assert_eq!(rendered.text, "relay = mail.local:25\n");
//! ```

pub mod diff;
pub mod error;
pub mod path;
pub mod render;
pub mod template;
pub mod values;

pub use diff::{LineChange, TextDiff};
pub use error::{Error, Result};
pub use path::{PathSegment, PlaceholderPath};
pub use render::{Rendered, render};
pub use template::{Segment, Template};
pub use values::ValueTree;
