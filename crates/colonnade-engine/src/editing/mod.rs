/*!
 * # Editing Core Module
 *
 * The column transform engine and the machinery it stands on.
 *
 * ## Architecture Overview
 *
 * ### 1. Immutable Tree, Explicit Transaction
 * - The document is a plain [`Node`](crate::model::Node) value; nothing in
 *   the engine mutates a tree in place
 * - All edits flow through a [`Transaction`] owned by the host: each
 *   replacement produces a new root, records a [`Step`], and maps the
 *   current [`Selection`] through the edit
 * - A transform either commits a fully-formed edit or leaves the caller's
 *   transaction untouched; partial application is never observable
 *
 * ### 2. Boundary-Token Positions
 * - Positions count node boundary tokens; resolving one yields its ancestor
 *   chain ([`ResolvedPos`]) and never lands inside an atomic node
 * - [`expand_selection`] widens a selection until both endpoints sit on
 *   block boundaries and reports how deeply each side cuts into the tree
 *
 * ### 3. Capability-Checked Transforms
 * - [`apply_columns`] and [`remove_columns`] are the only entry points;
 *   both consult the host-supplied
 *   [`SchemaCapability`](crate::schema::SchemaCapability) and
 *   [`LayoutOptions`](crate::schema::LayoutOptions) rather than any
 *   built-in notion of a document schema
 * - Expected rejections (depth mismatch, content not allowed) are typed
 *   errors logged as `tracing` warnings; the host decides what to show the
 *   user
 *
 * ## Module Structure
 *
 * - **`position`**: position resolution and the `ResolvedPos` ancestor chain
 * - **`selection`**: range/node selections, mapping, block-boundary expansion
 * - **`replace`**: pure split/replace/slice tree surgery
 * - **`transaction`**: the step log and selection-preserving mutation API
 * - **`locate`**: predicate-driven ancestor lookup
 * - **`builder`**: construction of well-formed column subtrees
 * - **`columns`**: the two transform entry points
 */

pub mod builder;
pub mod columns;
pub mod locate;
pub mod position;
pub mod replace;
pub mod selection;
pub mod transaction;

pub use builder::{build_column, build_column_block, build_n_columns};
pub use columns::{ColumnError, apply_columns, remove_columns};
pub use locate::{FoundNode, find_ancestor};
pub use position::{PositionError, ResolvedPos, resolve};
pub use replace::content_between;
pub use selection::{ExpandedSelection, Selection, expand_selection};
pub use transaction::{Step, Transaction};
