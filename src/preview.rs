use crate::plan::ScaffoldPlan;
use colored::Colorize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Debug)]
struct TreeNode {
    name: String,
    children: Vec<Rc<RefCell<TreeNode>>>,
    is_file: bool,
}
impl TreeNode {
    fn new(name: String, is_file: bool) -> Self {
        Self {
            name,
            children: Vec::new(),
            is_file,
        }
    }
}

/// Finds or creates the node for `rel`, creating any missing ancestor
/// directory nodes along the way. Plans only declare leaf directories
/// (`public/assets/css` without `public/assets`), so intermediate nodes are
/// synthesized here.
fn ensure_node(
    lookup: &mut HashMap<PathBuf, Rc<RefCell<TreeNode>>>,
    rel: &Path,
    is_file: bool,
) -> Rc<RefCell<TreeNode>> {
    if let Some(node) = lookup.get(rel) {
        return Rc::clone(node);
    }

    let parent = rel.parent().unwrap_or_else(|| Path::new(""));
    let parent_node = ensure_node(lookup, parent, false);

    let name = rel
        .file_name()
        .map(|os| os.to_string_lossy().to_string())
        .unwrap_or_else(|| rel.display().to_string());

    let node = Rc::new(RefCell::new(TreeNode::new(name, is_file)));

    parent_node.borrow_mut().children.push(Rc::clone(&node));
    lookup.insert(rel.to_path_buf(), Rc::clone(&node));

    node
}

fn build_tree(plan: &ScaffoldPlan, destination: &Path) -> Rc<RefCell<TreeNode>> {
    let root_name = destination
        .file_name()
        .map(|os| os.to_string_lossy().to_string())
        .unwrap_or_else(|| destination.display().to_string());

    let root = Rc::new(RefCell::new(TreeNode::new(root_name, false)));

    let mut lookup: HashMap<PathBuf, Rc<RefCell<TreeNode>>> = HashMap::new();
    lookup.insert(PathBuf::new(), Rc::clone(&root));

    for entry in plan.entries() {
        ensure_node(&mut lookup, &entry.path, entry.is_file());
    }

    root
}

fn print_tree(node: &Rc<RefCell<TreeNode>>, prefix: &str, is_last: bool) {
    let node_borrow = node.borrow();

    let connector = if is_last {
        "└── ".yellow()
    } else {
        "├── ".yellow()
    };
    let name = if node_borrow.is_file {
        node_borrow.name.green()
    } else {
        node_borrow.name.blue()
    };
    println!("{}{}{}", prefix.yellow(), connector, name);

    let child_prefix = if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    };

    let len = node_borrow.children.len();
    for (i, child) in node_borrow.children.iter().enumerate() {
        print_tree(child, &child_prefix, i == len - 1);
    }
}

/// Prints the tree the plan would materialize under `destination`, without
/// touching the filesystem.
pub fn preview_as_tree(plan: &ScaffoldPlan, destination: &Path) {
    let tree_root = build_tree(plan, destination);

    println!(
        "Legend: {} = (directory), {} = (file)\n",
        "blue".blue(),
        "green".green()
    );

    print_tree(&tree_root, "", true);
}
