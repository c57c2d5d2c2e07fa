//! Self-adjusting binary search tree (splay tree)
//!
//! Nodes are stored in an arena and linked by index, so a rotation is a
//! handful of index reassignments. Every `search` and `insert` splays the
//! tree toward the target key, leaving the matching node (or the last node
//! on the search path) at the root.
//!
//! ```text
//!   zig-zig (key < x.left.key)          zig-zag (x.left.key < key)
//!
//!         x              z                 x                z
//!        /              / \               /                / \
//!       y      ==>     ?   y             y       ==>      y   x
//!      /                    \             \
//!     z                      x             z
//! ```
//!
//! The grandchild subtree is splayed first, then the two rotations are
//! applied. This double step is what keeps operations O(log n) amortized;
//! rotating the target up one level at a time does not.

use std::cmp::Ordering;

use tracing::trace;

/// Direction taken from a grandparent to its grandchild during descent
#[derive(Debug, Clone, Copy)]
enum Step {
    LeftLeft,
    LeftRight,
    RightLeft,
    RightRight,
}

/// Node in the tree arena
#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    left: Option<usize>,
    right: Option<usize>,
}

/// Unbounded ordered key-value store reorganized on every access
#[derive(Debug)]
pub struct SelfAdjustingTree<K, V> {
    nodes: Vec<Node<K, V>>,
    root: Option<usize>,
}

impl<K: Ord, V> SelfAdjustingTree<K, V> {
    /// Create an empty tree
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// Look up a key, splaying toward it even on a miss
    pub fn search(&mut self, key: &K) -> Option<&V> {
        self.root = self.splay(self.root, key);
        let root = &self.nodes[self.root?];
        (root.key == *key).then_some(&root.value)
    }

    /// Insert a key-value pair, or overwrite the value of an existing key
    ///
    /// Either way the key's node ends up at the root.
    pub fn insert(&mut self, key: K, value: V) {
        let Some(root) = self.splay(self.root, &key) else {
            self.root = Some(self.alloc_node(key, value));
            return;
        };

        let ordering = key.cmp(&self.nodes[root].key);
        if ordering == Ordering::Equal {
            self.nodes[root].value = value;
            self.root = Some(root);
            return;
        }

        let idx = self.alloc_node(key, value);
        if ordering == Ordering::Less {
            self.nodes[idx].left = self.nodes[root].left.take();
            self.nodes[idx].right = Some(root);
        } else {
            self.nodes[idx].right = self.nodes[root].right.take();
            self.nodes[idx].left = Some(root);
        }
        self.root = Some(idx);
    }

    /// Key currently at the root
    pub fn root_key(&self) -> Option<&K> {
        self.root.map(|idx| &self.nodes[idx].key)
    }

    /// Keys in ascending (in-order) order
    pub fn keys(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::new();
        let mut cursor = self.root;

        while cursor.is_some() || !stack.is_empty() {
            while let Some(idx) = cursor {
                stack.push(idx);
                cursor = self.nodes[idx].left;
            }
            if let Some(idx) = stack.pop() {
                keys.push(&self.nodes[idx].key);
                cursor = self.nodes[idx].right;
            }
        }

        keys
    }

    /// Number of nodes on the longest root-to-leaf path
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(usize, usize)> = self.root.map(|idx| (idx, 1)).into_iter().collect();

        while let Some((idx, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[idx];
            stack.extend(node.left.map(|child| (child, depth + 1)));
            stack.extend(node.right.map(|child| (child, depth + 1)));
        }

        height
    }

    /// Get the number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drop every node
    pub fn clear(&mut self) {
        trace!(dropped = self.nodes.len(), "clearing splay tree");
        self.nodes.clear();
        self.root = None;
    }

    /// Splay the subtree rooted at `root` toward `key`, returning the new
    /// subtree root
    ///
    /// Descends two levels per step, recording each grandparent, parent and
    /// direction on `path`, then unwinds the path applying the double
    /// rotations bottom-up. Stack depth stays constant however deep the
    /// search path is.
    fn splay(&mut self, root: Option<usize>, key: &K) -> Option<usize> {
        let mut path: Vec<(usize, usize, Step)> = Vec::new();
        let mut cursor = root;

        let mut subtree = loop {
            let Some(x) = cursor else {
                break None;
            };

            match key.cmp(&self.nodes[x].key) {
                Ordering::Equal => break Some(x),
                Ordering::Less => {
                    let Some(y) = self.nodes[x].left else {
                        break Some(x);
                    };
                    match key.cmp(&self.nodes[y].key) {
                        Ordering::Less => {
                            path.push((x, y, Step::LeftLeft));
                            cursor = self.nodes[y].left;
                        }
                        Ordering::Greater => {
                            path.push((x, y, Step::LeftRight));
                            cursor = self.nodes[y].right;
                        }
                        // zig
                        Ordering::Equal => break Some(self.rotate_right(x)),
                    }
                }
                Ordering::Greater => {
                    let Some(y) = self.nodes[x].right else {
                        break Some(x);
                    };
                    match key.cmp(&self.nodes[y].key) {
                        Ordering::Less => {
                            path.push((x, y, Step::RightLeft));
                            cursor = self.nodes[y].left;
                        }
                        Ordering::Greater => {
                            path.push((x, y, Step::RightRight));
                            cursor = self.nodes[y].right;
                        }
                        // zag
                        Ordering::Equal => break Some(self.rotate_left(x)),
                    }
                }
            }
        };

        while let Some((x, y, step)) = path.pop() {
            let top = match step {
                Step::LeftLeft => {
                    // zig-zig
                    self.nodes[y].left = subtree;
                    let x = self.rotate_right(x);
                    if self.nodes[x].left.is_some() {
                        self.rotate_right(x)
                    } else {
                        x
                    }
                }
                Step::LeftRight => {
                    // zig-zag, realigned only if the grandchild exists
                    self.nodes[y].right = subtree;
                    if subtree.is_some() {
                        self.nodes[x].left = Some(self.rotate_left(y));
                    }
                    self.rotate_right(x)
                }
                Step::RightLeft => {
                    // zag-zig, realigned only if the grandchild exists
                    self.nodes[y].left = subtree;
                    if subtree.is_some() {
                        self.nodes[x].right = Some(self.rotate_right(y));
                    }
                    self.rotate_left(x)
                }
                Step::RightRight => {
                    // zag-zag
                    self.nodes[y].right = subtree;
                    let x = self.rotate_left(x);
                    if self.nodes[x].right.is_some() {
                        self.rotate_left(x)
                    } else {
                        x
                    }
                }
            };
            subtree = Some(top);
        }

        subtree
    }

    /// Lift `x.left` above `x`; a node without a left child is returned as is
    fn rotate_right(&mut self, x: usize) -> usize {
        let Some(y) = self.nodes[x].left else {
            return x;
        };
        self.nodes[x].left = self.nodes[y].right;
        self.nodes[y].right = Some(x);
        y
    }

    /// Lift `x.right` above `x`; a node without a right child is returned as is
    fn rotate_left(&mut self, x: usize) -> usize {
        let Some(y) = self.nodes[x].right else {
            return x;
        };
        self.nodes[x].right = self.nodes[y].left;
        self.nodes[y].left = Some(x);
        y
    }

    fn alloc_node(&mut self, key: K, value: V) -> usize {
        self.nodes.push(Node {
            key,
            value,
            left: None,
            right: None,
        });
        self.nodes.len() - 1
    }
}

impl<K: Ord, V> Default for SelfAdjustingTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
