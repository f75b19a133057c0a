use derive_new::new;

/// One step of an edit script, expressed as indices into the compared slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Equal { old: usize, new: usize },
    Delete { old: usize },
    Insert { new: usize },
}

impl Edit {
    pub fn is_change(&self) -> bool {
        !matches!(self, Edit::Equal { .. })
    }
}

/// Myers' O(ND) diff.
///
/// `shortest_edit` records the furthest-reaching x for every diagonal after each
/// round; `diff` walks that trace backwards to recover the edit script.
#[derive(Debug, Clone, new)]
pub struct MyersDiff<'d, T> {
    a: &'d [T],
    b: &'d [T],
}

impl<'d, T: Eq> MyersDiff<'d, T> {
    fn offset(&self) -> isize {
        (self.a.len() + self.b.len()) as isize + 1
    }

    fn shortest_edit(&self) -> Vec<Vec<isize>> {
        let (n, m) = (self.a.len() as isize, self.b.len() as isize);
        let offset = self.offset();

        let mut v = vec![0isize; (2 * offset + 1) as usize];
        let mut trace = Vec::new();

        for d in 0..=(n + m) {
            trace.push(v.clone());

            for k in (-d..=d).step_by(2) {
                let idx = (offset + k) as usize;

                // moving down (insertion) from k+1 or right (deletion) from k-1
                let mut x = if k == -d || (k != d && v[idx - 1] < v[idx + 1]) {
                    v[idx + 1]
                } else {
                    v[idx - 1] + 1
                };
                let mut y = x - k;

                while x < n && y < m && self.a[x as usize] == self.b[y as usize] {
                    x += 1;
                    y += 1;
                }

                v[idx] = x;

                if x >= n && y >= m {
                    return trace;
                }
            }
        }

        trace
    }

    pub fn diff(&self) -> Vec<Edit> {
        let offset = self.offset();
        let (mut x, mut y) = (self.a.len() as isize, self.b.len() as isize);
        let mut edits = Vec::new();

        for (d, v) in self.shortest_edit().iter().enumerate().rev() {
            let d = d as isize;
            let k = x - y;

            let prev_k = if k == -d
                || (k != d && v[(offset + k - 1) as usize] < v[(offset + k + 1) as usize])
            {
                k + 1
            } else {
                k - 1
            };
            let prev_x = v[(offset + prev_k) as usize];
            let prev_y = prev_x - prev_k;

            while x > prev_x && y > prev_y {
                edits.push(Edit::Equal {
                    old: (x - 1) as usize,
                    new: (y - 1) as usize,
                });
                x -= 1;
                y -= 1;
            }

            if d > 0 {
                if x == prev_x {
                    edits.push(Edit::Insert {
                        new: prev_y as usize,
                    });
                } else {
                    edits.push(Edit::Delete {
                        old: prev_x as usize,
                    });
                }
            }

            (x, y) = (prev_x, prev_y);
        }

        edits.reverse();
        edits
    }
}
