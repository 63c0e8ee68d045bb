/*
Workaround for error: https://doc.rust-lang.org/error_codes/E0116.html
Cannot define inherent `impl` for a type outside of the crate where the type is defined

define a trait that has the desired associated functions/types/constants and implement the trait for the type in question
 */
use termtree::Tree;
use tracing::instrument;

use crate::view::TreeView;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for TreeView {
    #[instrument(level = "debug")]
    fn to_tree_string(&self) -> Tree<String> {
        // The root label is "name (id)"
        let root = format!("{} ({})", self.name, self.id);

        // Recursively construct the children
        let leaves: Vec<_> = self.children.iter().map(|c| c.to_tree_string()).collect();

        Tree::new(root).with_leaves(leaves)
    }
}
