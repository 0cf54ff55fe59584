use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::{
        domain::{
            media::{Media, MediaKind},
            Subscription,
        },
        dto::request::CreateMediaRequest,
    },
    repositories::{MediaRepository, SubscriptionRepository},
};

const MEDIA_LIST_LIMIT: i64 = 200;
const SUBSCRIPTION_LIST_LIMIT: i64 = 500;

/// Media bookkeeping and subscription listing for the admin dashboard.
pub struct AdminService {
    media: Arc<dyn MediaRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl AdminService {
    pub fn new(
        media: Arc<dyn MediaRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
    ) -> Self {
        Self {
            media,
            subscriptions,
        }
    }

    pub async fn create_media(
        &self,
        request: CreateMediaRequest,
        uploaded_by: Option<String>,
    ) -> AppResult<Media> {
        let kind = match request.kind.as_deref() {
            Some("pdf") => MediaKind::Pdf,
            Some("video") => MediaKind::Video,
            Some("other") => MediaKind::Other,
            _ => MediaKind::Image,
        };

        let mut media = Media::new(kind, &request.url, uploaded_by);
        media.filename = request.filename;
        media.size = request.size;

        self.media.create(media).await
    }

    pub async fn list_media(&self) -> AppResult<Vec<Media>> {
        self.media.list(MEDIA_LIST_LIMIT).await
    }

    pub async fn delete_media(&self, id: &str) -> AppResult<()> {
        self.media.delete(id).await
    }

    pub async fn list_subscriptions(&self) -> AppResult<Vec<Subscription>> {
        self.subscriptions.list(SUBSCRIPTION_LIST_LIMIT).await
    }
}
