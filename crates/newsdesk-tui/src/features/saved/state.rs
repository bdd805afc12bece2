use newsdesk_core::models::{Article, saved_keywords};

/// The signed-in user's bookmarked articles.
#[derive(Debug, Default)]
pub struct SavedState {
    pub items: Vec<Article>,
    pub selected: usize,
    /// Set once the mount-time load has settled (either way).
    pub loaded: bool,
}

impl SavedState {
    /// Saved copy of the article at `url`, if bookmarked.
    pub fn find_by_url(&self, url: &str) -> Option<&Article> {
        self.items.iter().find(|item| item.url == url)
    }

    pub fn contains_url(&self, url: &str) -> bool {
        self.find_by_url(url).is_some()
    }

    pub fn keywords(&self) -> Vec<String> {
        saved_keywords(&self.items)
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.items.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn replace(&mut self, items: Vec<Article>) {
        self.items = items;
        self.clamp_selection();
    }

    pub fn push(&mut self, article: Article) {
        self.items.push(article);
    }

    /// Removes by server id. Returns true if something was removed.
    pub fn remove_id(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id.as_deref() != Some(id));
        self.clamp_selection();
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.selected = 0;
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
    }
}
