//! Directory tree of measured files, keyed by path segment.

use std::collections::BTreeMap;
use std::path::{Component, Path};

use crate::coverage::FileCoverage;

use super::cell::display_width;

/// Child entries of a directory, iterated in sorted name order.
pub type Children<'a, F> = BTreeMap<String, TreeNode<'a, F>>;

/// A node of the report tree.
#[derive(Debug)]
pub enum TreeNode<'a, F> {
    /// A measured file
    File(&'a F),
    /// A directory holding at least one file somewhere below it
    Directory(Children<'a, F>),
}

impl<'a, F: FileCoverage> TreeNode<'a, F> {
    /// Every file below this node, in sorted path order.
    pub fn files(&self) -> Vec<&'a F> {
        let mut files = Vec::new();
        self.collect_files(&mut files);
        files
    }

    fn collect_files(&self, out: &mut Vec<&'a F>) {
        match self {
            TreeNode::File(file) => out.push(file),
            TreeNode::Directory(children) => {
                for child in children.values() {
                    child.collect_files(out);
                }
            }
        }
    }
}

/// Build the tree of `files`, with names made relative to `root`.
pub fn build_tree<'a, F: FileCoverage>(files: &'a [F], root: &Path) -> Children<'a, F> {
    let mut tree = Children::new();

    for file in files {
        let parts = relative_segments(file.filename(), root);
        let Some((leaf, dirs)) = parts.split_last() else {
            continue;
        };

        let mut current = &mut tree;
        for dir in dirs {
            let node = current
                .entry(dir.clone())
                .or_insert_with(|| TreeNode::Directory(Children::new()));
            if let TreeNode::File(_) = node {
                *node = TreeNode::Directory(Children::new());
            }
            current = match node {
                TreeNode::Directory(children) => children,
                TreeNode::File(_) => unreachable!("file nodes were replaced above"),
            };
        }
        // A directory of the same name keeps its subtree.
        if !matches!(current.get(leaf), Some(TreeNode::Directory(_))) {
            current.insert(leaf.clone(), TreeNode::File(file));
        }
    }

    tree
}

/// Path segments of `filename` below `root`. Files outside the root keep
/// their full path.
pub fn relative_segments(filename: &Path, root: &Path) -> Vec<String> {
    let relative = filename.strip_prefix(root).unwrap_or(filename);
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

/// Widest name in the tree, counting one column of indent per depth level.
pub fn max_name_width<F>(tree: &Children<'_, F>, depth: usize) -> usize {
    tree.iter()
        .map(|(name, node)| {
            let own = depth + display_width(name);
            match node {
                TreeNode::File(_) => own,
                TreeNode::Directory(children) => own.max(max_name_width(children, depth + 1)),
            }
        })
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::{LineState, SourceFile};

    fn file(path: &str) -> SourceFile {
        SourceFile::from_states(path, &[LineState::Covered])
    }

    fn dir<'t, 'a>(node: &'t TreeNode<'a, SourceFile>) -> &'t Children<'a, SourceFile> {
        match node {
            TreeNode::Directory(children) => children,
            TreeNode::File(f) => panic!("expected directory, got file {:?}", f.path()),
        }
    }

    fn leaf<'a>(node: &TreeNode<'a, SourceFile>) -> &'a SourceFile {
        match node {
            TreeNode::File(f) => f,
            TreeNode::Directory(_) => panic!("expected file"),
        }
    }

    #[test]
    fn test_build_tree_single_file() {
        let files = vec![file("/app/lib/test.rb")];
        let tree = build_tree(&files, Path::new("/app"));

        let lib = dir(&tree["lib"]);
        assert_eq!(leaf(&lib["test.rb"]).path(), Path::new("/app/lib/test.rb"));
    }

    #[test]
    fn test_build_tree_nested_files() {
        let files = vec![file("lib/models/user.rb"), file("lib/controllers/api.rb")];
        let tree = build_tree(&files, Path::new("/app"));

        assert_eq!(tree.len(), 1);
        let lib = dir(&tree["lib"]);
        assert_eq!(lib.len(), 2);
        assert_eq!(
            leaf(&dir(&lib["models"])["user.rb"]).path(),
            Path::new("lib/models/user.rb")
        );
        assert_eq!(
            leaf(&dir(&lib["controllers"])["api.rb"]).path(),
            Path::new("lib/controllers/api.rb")
        );
    }

    #[test]
    fn test_files_outside_root_keep_full_path() {
        assert_eq!(
            relative_segments(Path::new("/other/x.rb"), Path::new("/app")),
            vec!["other", "x.rb"]
        );
    }

    #[test]
    fn test_directory_files_are_sorted() {
        let files = vec![file("/app/b/z.rb"), file("/app/b/a.rb"), file("/app/b/c/d.rb")];
        let tree = build_tree(&files, Path::new("/app"));

        let paths: Vec<_> = tree["b"].files().iter().map(|f| f.path().to_path_buf()).collect();
        assert_eq!(
            paths,
            vec![
                Path::new("/app/b/a.rb").to_path_buf(),
                Path::new("/app/b/c/d.rb").to_path_buf(),
                Path::new("/app/b/z.rb").to_path_buf()
            ]
        );
    }

    #[test]
    fn test_directory_wins_over_file_of_same_name() {
        let file_first = vec![file("/app/lib/x"), file("/app/lib/x/y.rb")];
        let dir_first = vec![file("/app/lib/x/y.rb"), file("/app/lib/x")];

        for files in [&file_first, &dir_first] {
            let tree = build_tree(files, Path::new("/app"));
            let x = dir(&dir(&tree["lib"])["x"]);
            assert_eq!(leaf(&x["y.rb"]).path(), Path::new("/app/lib/x/y.rb"));
        }
    }

    #[test]
    fn test_max_name_width_single_level() {
        let files = vec![file("/app/test.rb")];
        let tree = build_tree(&files, Path::new("/app"));
        assert_eq!(max_name_width(&tree, 0), 7);
    }

    #[test]
    fn test_max_name_width_counts_indent() {
        let files = vec![file("/app/lib/models/user_profile.rb")];
        let tree = build_tree(&files, Path::new("/app"));
        // "user_profile.rb" (15) at depth 2
        assert_eq!(max_name_width(&tree, 0), 17);
    }

    #[test]
    fn test_empty_tree_width() {
        let tree: Children<'_, SourceFile> = Children::new();
        assert_eq!(max_name_width(&tree, 0), 0);
    }
}
