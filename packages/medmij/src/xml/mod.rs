//! Namespace-aware XML helpers for navigating list documents.

mod utils;

pub use utils::{
    element_children, find_child, find_descendants, get_text, has_qname, required_child,
    single_descendant,
};
