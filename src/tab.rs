//! Timeline tab store
//!
//! A [`Tab`] holds the posts shown in one timeline view. Posts arrive in two
//! phases: they are staged into a pending buffer (possibly while a batch of
//! fetch results is still coming in) and then applied to the visible
//! sequence in one [`Tab::submit`] call.
//!
//! While the tab is sorted by ID, a batch of newer posts is placed at the
//! newest end without a full re-sort. Anything else (an older post showing
//! up, a forced insert, another sort mode) leaves the sequence unsorted
//! until [`Tab::sort`] is called.

use std::collections::{BTreeMap, HashMap};

use crate::filter::{FilterResult, FilterRule};
use crate::models::{Post, PostId, SortMode, SortOrder, TabType};

/// Read state and payload of one post in a tab
#[derive(Debug, Clone)]
struct Entry {
    is_read: bool,
    post: Option<Post>,
}

/// A post waiting in the pending buffer
#[derive(Debug, Clone)]
struct Staged {
    is_read: bool,
    post: Option<Post>,
    force: bool,
}

/// An attached rule and the revision it had when the tab last cleared its
/// modified flag
#[derive(Debug, Clone)]
struct Subscription {
    rule: FilterRule,
    seen_revision: u64,
}

impl Subscription {
    fn new(rule: FilterRule) -> Self {
        let seen_revision = rule.revision();
        Self {
            rule,
            seen_revision,
        }
    }

    fn is_stale(&self) -> bool {
        self.rule.revision() != self.seen_revision
    }
}

/// One timeline view's posts, order and unread state
#[derive(Debug, Clone)]
pub struct Tab {
    name: String,
    tab_type: TabType,
    unread_manage: bool,
    sort_mode: SortMode,
    sort_order: SortOrder,
    /// Visible sequence
    ids: Vec<PostId>,
    entries: HashMap<PostId, Entry>,
    pending: BTreeMap<PostId, Staged>,
    /// What the visible sequence is actually ordered by, if anything
    ordered_by: Option<(SortMode, SortOrder)>,
    filters: Vec<Subscription>,
    filter_modified: bool,
}

impl Default for Tab {
    fn default() -> Self {
        Self::new("", TabType::default())
    }
}

impl Tab {
    /// Create an empty tab with unread tracking on, sorted by ascending ID
    pub fn new(name: &str, tab_type: TabType) -> Self {
        Self {
            name: name.to_string(),
            tab_type,
            unread_manage: true,
            sort_mode: SortMode::Id,
            sort_order: SortOrder::Ascending,
            ids: Vec::new(),
            entries: HashMap::new(),
            pending: BTreeMap::new(),
            ordered_by: Some((SortMode::Id, SortOrder::Ascending)),
            filters: Vec::new(),
            filter_modified: false,
        }
    }

    /// Tab title
    pub fn name(&self) -> &str {
        &self.name
    }

    /// What the tab is used for
    pub const fn tab_type(&self) -> TabType {
        self.tab_type
    }

    /// Whether the tab keeps its own post payloads
    pub const fn is_inner_storage(&self) -> bool {
        self.tab_type.is_inner_storage()
    }

    /// Whether read/unread state is surfaced for this tab
    pub const fn unread_manage(&self) -> bool {
        self.unread_manage
    }

    /// Turn unread tracking on or off
    pub fn set_unread_manage(&mut self, enabled: bool) {
        self.unread_manage = enabled;
    }

    // ---- Staging ----

    /// Stage a post. Nothing visible changes until [`Tab::submit`].
    ///
    /// Staging the same ID twice keeps the last one.
    pub fn stage(&mut self, post: Post) {
        self.stage_inner(post, false);
    }

    /// Stage a post as a forced insert: it is placed without regard for the
    /// current order, and an existing copy is moved rather than updated in
    /// place.
    pub fn stage_forced(&mut self, post: Post) {
        self.stage_inner(post, true);
    }

    fn stage_inner(&mut self, post: Post, force: bool) {
        self.pending.insert(
            post.id,
            Staged {
                is_read: post.is_read,
                post: Some(post),
                force,
            },
        );
    }

    /// Stage a post by ID only, for tabs whose payloads live elsewhere
    pub fn add(&mut self, id: PostId, is_read: bool, force: bool) {
        self.pending.insert(
            id,
            Staged {
                is_read,
                post: None,
                force,
            },
        );
    }

    /// Number of staged posts not yet submitted
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Apply every staged post to the visible sequence.
    ///
    /// Returns how many IDs were new to the tab; replaced posts are not
    /// counted.
    pub fn submit(&mut self) -> usize {
        if self.pending.is_empty() {
            return 0;
        }

        let keep_sorted = self.is_sorted_by_id();
        let pending = std::mem::take(&mut self.pending);

        let mut placed = Vec::with_capacity(pending.len());
        let mut new_count = 0;
        let mut forced = false;

        for (id, staged) in pending {
            match self.entries.get_mut(&id) {
                Some(entry) => {
                    if let Some(post) = staged.post {
                        entry.is_read = post.is_read;
                        entry.post = Some(post);
                    }
                    if staged.force {
                        if let Some(pos) = self.ids.iter().position(|&x| x == id) {
                            self.ids.remove(pos);
                        }
                        placed.push(id);
                        forced = true;
                    }
                }
                None => {
                    self.entries.insert(
                        id,
                        Entry {
                            is_read: staged.is_read,
                            post: staged.post,
                        },
                    );
                    placed.push(id);
                    new_count += 1;
                    forced |= staged.force;
                }
            }
        }

        if placed.is_empty() {
            tracing::debug!(tab = %self.name, "Submitted updates only");
            return 0;
        }

        // `placed` is ascending: the pending buffer is keyed by ID
        if keep_sorted && !forced && self.is_newer_than_all(placed[0]) {
            match self.sort_order {
                SortOrder::Ascending => self.ids.extend(placed),
                SortOrder::Descending => {
                    placed.reverse();
                    placed.append(&mut self.ids);
                    self.ids = placed;
                }
            }
            self.ordered_by = Some((SortMode::Id, self.sort_order));
        } else {
            self.ids.extend(placed);
            self.ordered_by = None;
        }

        tracing::debug!(
            tab = %self.name,
            new = new_count,
            total = self.ids.len(),
            sorted = self.ordered_by.is_some(),
            "Submitted posts"
        );

        new_count
    }

    /// Whether `id` is larger than every ID in the visible sequence
    fn is_newer_than_all(&self, id: PostId) -> bool {
        let newest = match self.sort_order {
            SortOrder::Ascending => self.ids.last(),
            SortOrder::Descending => self.ids.first(),
        };
        newest.is_none_or(|&newest| newest < id)
    }

    // ---- Ordering ----

    /// Current sort column
    pub const fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    /// Current sort direction
    pub const fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Change the sort column without re-sorting
    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.sort_mode = mode;
    }

    /// Change the sort direction without re-sorting
    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.sort_order = order;
    }

    /// Change column and direction, then sort
    pub fn set_sort(&mut self, mode: SortMode, order: SortOrder) {
        self.sort_mode = mode;
        self.sort_order = order;
        self.sort();
    }

    /// Stable sort of the visible sequence by the current column and
    /// direction
    pub fn sort(&mut self) {
        let mode = self.sort_mode;
        let order = self.sort_order;
        let entries = &self.entries;

        self.ids.sort_by(|a, b| {
            let ordering = if mode == SortMode::Id {
                a.cmp(b)
            } else {
                match (
                    entries.get(a).and_then(|e| e.post.as_ref()),
                    entries.get(b).and_then(|e| e.post.as_ref()),
                ) {
                    (Some(pa), Some(pb)) => mode.compare(pa, pb),
                    // Posts without a payload go first, by ID
                    (None, Some(_)) => std::cmp::Ordering::Less,
                    (Some(_), None) => std::cmp::Ordering::Greater,
                    (None, None) => a.cmp(b),
                }
            };
            order.apply(ordering)
        });

        self.ordered_by = Some((mode, order));
        tracing::debug!(tab = %self.name, %mode, ?order, "Sorted {} posts", self.ids.len());
    }

    /// Whether the tab sorts by ID and the visible sequence really is in
    /// that order.
    ///
    /// Evaluated on every call, so changing the mode or direction without
    /// calling [`Tab::sort`] shows up immediately.
    pub fn is_sorted_by_id(&self) -> bool {
        self.sort_mode == SortMode::Id
            && (self.ids.is_empty() || self.ordered_by == Some((SortMode::Id, self.sort_order)))
    }

    // ---- Lookup ----

    /// Number of posts in the visible sequence
    pub fn all_count(&self) -> usize {
        self.ids.len()
    }

    /// Whether the visible sequence is empty
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// IDs in visible order
    pub fn ids(&self) -> &[PostId] {
        &self.ids
    }

    /// Position of a post in the visible sequence
    pub fn index_of(&self, id: PostId) -> Option<usize> {
        self.ids.iter().position(|&x| x == id)
    }

    /// Whether the post is in the visible sequence
    pub fn contains(&self, id: PostId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Payload of a post, if the tab holds one
    pub fn get(&self, id: PostId) -> Option<&Post> {
        self.entries.get(&id).and_then(|e| e.post.as_ref())
    }

    /// Payloads in visible order. IDs without a payload are skipped.
    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.ids.iter().filter_map(|id| self.get(*id))
    }

    /// Drop a post from the tab. Returns its payload when one was held.
    pub fn remove(&mut self, id: PostId) -> Option<Post> {
        let entry = self.entries.remove(&id)?;
        if let Some(pos) = self.index_of(id) {
            // Removing keeps the remaining order intact
            self.ids.remove(pos);
        }
        entry.post
    }

    /// Drop every post, staged or visible
    pub fn clear(&mut self) {
        self.ids.clear();
        self.entries.clear();
        self.pending.clear();
        self.ordered_by = Some((self.sort_mode, self.sort_order));
    }

    // ---- Unread bookkeeping ----

    /// Number of unread posts; `0` when unread tracking is off
    pub fn unread_count(&self) -> usize {
        if !self.unread_manage {
            return 0;
        }
        self.ids
            .iter()
            .filter(|id| self.entries.get(id).is_some_and(|e| !e.is_read))
            .count()
    }

    /// Smallest unread ID; `None` when nothing is unread or tracking is off
    pub fn oldest_unread_id(&self) -> Option<PostId> {
        if !self.unread_manage {
            return None;
        }
        self.ids
            .iter()
            .copied()
            .filter(|id| self.entries.get(id).is_some_and(|e| !e.is_read))
            .min()
    }

    /// Position of the oldest unread post in the visible sequence
    pub fn oldest_unread_index(&self) -> Option<usize> {
        self.oldest_unread_id().and_then(|id| self.index_of(id))
    }

    /// Read state of a post
    pub fn is_read(&self, id: PostId) -> Option<bool> {
        self.entries.get(&id).map(|e| e.is_read)
    }

    /// Mark a post read or unread. Unknown IDs are ignored.
    pub fn set_read_state(&mut self, id: PostId, is_read: bool) {
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.is_read = is_read;
            if let Some(post) = entry.post.as_mut() {
                post.is_read = is_read;
            }
        }
    }

    /// Mark every post in the tab read
    pub fn mark_all_read(&mut self) {
        for entry in self.entries.values_mut() {
            entry.is_read = true;
            if let Some(post) = entry.post.as_mut() {
                post.is_read = true;
            }
        }
    }

    // ---- Filters ----

    /// Attach a rule. Attaching a rule the tab already holds does nothing
    /// beyond flagging the filters as modified.
    pub fn add_filter(&mut self, rule: FilterRule) {
        if !self.filters.iter().any(|s| s.rule == rule) {
            tracing::debug!(tab = %self.name, rule = %rule.id(), "Attached filter");
            self.filters.push(Subscription::new(rule));
        }
        self.filter_modified = true;
    }

    /// Detach a rule. The rule keeps living; later edits to it no longer
    /// affect this tab.
    pub fn remove_filter(&mut self, rule: &FilterRule) {
        self.filters.retain(|s| s.rule != *rule);
        self.filter_modified = true;
        tracing::debug!(tab = %self.name, rule = %rule.id(), "Detached filter");
    }

    /// Attached rules, in attach order
    pub fn filters(&self) -> Vec<FilterRule> {
        self.filters.iter().map(|s| s.rule.clone()).collect()
    }

    /// Replace every attached rule
    pub fn set_filters(&mut self, rules: Vec<FilterRule>) {
        self.filters.clear();
        for rule in rules {
            if !self.filters.iter().any(|s| s.rule == rule) {
                self.filters.push(Subscription::new(rule));
            }
        }
        self.filter_modified = true;
    }

    /// Whether the rule set changed, or an attached rule was edited, since
    /// the flag was last cleared
    pub fn filter_modified(&self) -> bool {
        self.filter_modified || self.filters.iter().any(Subscription::is_stale)
    }

    /// Set or clear the modified flag. Clearing it also acknowledges every
    /// edit made to the attached rules so far.
    pub fn set_filter_modified(&mut self, modified: bool) {
        self.filter_modified = modified;
        if !modified {
            for sub in &mut self.filters {
                sub.seen_revision = sub.rule.revision();
            }
        }
    }

    /// Match a post against every attached rule.
    ///
    /// An exclusion from any rule wins; otherwise the strongest match
    /// (move over mark over copy) is returned.
    pub fn evaluate_filters(&self, post: &Post) -> FilterResult {
        self.filters
            .iter()
            .map(|s| s.rule.evaluate(post))
            .max()
            .unwrap_or_default()
    }
}
