//! XML utilities on top of `roxmltree`.

mod utils;

pub use utils::{
    element_children, get_attribute, get_namespace, get_tag_name, get_text,
    get_text_owned, has_tag, qualified_name, single_child, single_child_named, strip_namespace,
};
