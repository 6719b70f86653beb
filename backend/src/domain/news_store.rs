use chrono::Local;
use log::{debug, info, warn};
use std::sync::Arc;

use shared::{
    Article, ArticleId, ArticlePatch, CategoryCount, CategoryFilter, NewArticle, NewsStoreState,
};

use super::category::count_categories;
use super::ids::IdGenerator;
use super::notify::{ChangeNotifier, StoreChange, SubscriptionId};
use super::seed;
use crate::error::StoreError;
use crate::storage::{load_state, save_state, StateStorage, NEWS_STORE_KEY};

/// News articles and the category selected on the news page
pub struct NewsStore {
    articles: Vec<Article>,
    selected_category: CategoryFilter,
    ids: IdGenerator,
    storage: Arc<dyn StateStorage>,
    notifier: ChangeNotifier,
}

impl NewsStore {
    pub fn open(storage: Arc<dyn StateStorage>) -> Result<Self, StoreError> {
        let state = match load_state::<NewsStoreState>(storage.as_ref(), NEWS_STORE_KEY) {
            Ok(Some(state)) => state,
            Ok(None) => {
                info!("No persisted news, using seed data");
                seed::news_state()
            }
            Err(StoreError::Serialization(e)) => {
                warn!("Persisted news is unreadable ({}), using seed data", e);
                seed::news_state()
            }
            Err(e) => return Err(e),
        };
        Ok(Self::from_state(state, storage))
    }

    pub fn from_state(state: NewsStoreState, storage: Arc<dyn StateStorage>) -> Self {
        let ids = IdGenerator::for_existing(state.articles.iter().map(|a| a.id));
        Self {
            articles: state.articles,
            selected_category: state.selected_category,
            ids,
            storage,
            notifier: ChangeNotifier::new(),
        }
    }

    pub fn state(&self) -> NewsStoreState {
        NewsStoreState {
            articles: self.articles.clone(),
            selected_category: self.selected_category.clone(),
        }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&StoreChange) + Send + Sync + 'static,
    {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Publish an article; a missing publish date becomes today's local date
    pub fn add(&mut self, new_article: NewArticle) -> Result<ArticleId, StoreError> {
        let previous = self.state();
        let id = self.ids.next_id();
        let publish_date = new_article
            .publish_date
            .unwrap_or_else(|| Local::now().date_naive());
        info!("Publishing article '{}' ({})", new_article.title, id);
        self.articles.push(Article {
            id,
            title: new_article.title,
            excerpt: new_article.excerpt,
            content: new_article.content,
            author: new_article.author,
            publish_date,
            image_url: new_article.image_url,
            category: new_article.category,
            tags: new_article.tags,
            read_time: new_article.read_time,
        });
        self.commit(previous, StoreChange::ArticleAdded(id))?;
        Ok(id)
    }

    pub fn update(&mut self, id: ArticleId, patch: ArticlePatch) -> Result<bool, StoreError> {
        let previous = self.state();
        let Some(article) = self.articles.iter_mut().find(|a| a.id == id) else {
            warn!("Cannot update unknown article {}", id);
            return Ok(false);
        };

        if let Some(title) = patch.title {
            article.title = title;
        }
        if let Some(excerpt) = patch.excerpt {
            article.excerpt = excerpt;
        }
        if let Some(content) = patch.content {
            article.content = content;
        }
        if let Some(author) = patch.author {
            article.author = author;
        }
        if let Some(publish_date) = patch.publish_date {
            article.publish_date = publish_date;
        }
        if let Some(image_url) = patch.image_url {
            article.image_url = image_url;
        }
        if let Some(category) = patch.category {
            article.category = category;
        }
        if let Some(tags) = patch.tags {
            article.tags = tags;
        }
        if let Some(read_time) = patch.read_time {
            article.read_time = read_time;
        }

        info!("Updated article {}", id);
        self.commit(previous, StoreChange::ArticleUpdated(id))?;
        Ok(true)
    }

    pub fn delete(&mut self, id: ArticleId) -> Result<bool, StoreError> {
        let previous = self.state();
        let before = self.articles.len();
        self.articles.retain(|a| a.id != id);
        if self.articles.len() == before {
            warn!("Cannot delete unknown article {}", id);
            return Ok(false);
        }

        info!("Deleted article {}", id);
        self.commit(previous, StoreChange::ArticleDeleted(id))?;
        Ok(true)
    }

    pub fn get_by_id(&self, id: ArticleId) -> Option<&Article> {
        self.articles.iter().find(|a| a.id == id)
    }

    pub fn filter_by_category(&self, filter: &CategoryFilter) -> Vec<&Article> {
        self.articles
            .iter()
            .filter(|a| filter.matches(&a.category))
            .collect()
    }

    pub fn selected_category(&self) -> &CategoryFilter {
        &self.selected_category
    }

    pub fn set_selected_category(&mut self, filter: CategoryFilter) -> Result<(), StoreError> {
        if filter == self.selected_category {
            return Ok(());
        }
        debug!("News category changed to {:?}", filter);
        let previous = self.state();
        self.selected_category = filter;
        self.commit(previous, StoreChange::NewsCategoryChanged)
    }

    pub fn filtered_articles(&self) -> Vec<&Article> {
        self.filter_by_category(&self.selected_category)
    }

    pub fn category_counts(&self) -> Vec<CategoryCount> {
        count_categories(self.articles.iter().map(|a| a.category.as_str()))
    }

    fn commit(&mut self, previous: NewsStoreState, change: StoreChange) -> Result<(), StoreError> {
        if let Err(e) = save_state(self.storage.as_ref(), NEWS_STORE_KEY, &self.state()) {
            warn!("Rolling back {:?}: {}", change, e);
            self.articles = previous.articles;
            self.selected_category = previous.selected_category;
            return Err(e);
        }
        self.notifier.notify(&change);
        Ok(())
    }
}
