//! JSON content routes
//!
//! Portfolio and personality listings plus the booking form, answered from
//! the content store. Store failures become status codes here: unknown
//! records 404, rejected input 400, duplicate slugs 409.

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::{Method, Response, StatusCode};
use serde::Serialize;

use crate::assets::AssetFs;
use crate::config::AppState;
use crate::http::{build_error_response, build_json_response};
use crate::logger;
use crate::models::{Category, CreateBooking, Package, Personality, PersonalityImage, Photo};
use crate::store::{ContentStore, StoreError};

/// A request the content store answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentRoute {
    /// `GET /portfolio/` or `GET /portfolio/<category>/`
    Portfolio(Option<String>),
    /// `GET /booking/`: the packages a booking can choose from
    Packages,
    /// `POST /booking/` with a JSON booking form
    CreateBooking,
    /// `GET /personalities/`
    Personalities,
    /// `GET /personalities/<slug>/`
    Personality(String),
}

impl ContentRoute {
    /// Match a request line. `None` leaves the request to the asset roots.
    ///
    /// The trailing slash is optional. A second segment that is not a slug,
    /// such as `portfolio/cover.jpg`, is left to the asset roots too.
    pub fn from_request(method: &Method, path: &str) -> Option<Self> {
        let path = path.strip_prefix('/')?;
        let path = path.strip_suffix('/').unwrap_or(path);
        let mut segments = path.split('/');

        let route = match (segments.next()?, segments.next(), segments.next()) {
            ("portfolio", None, None) => Self::Portfolio(None),
            ("portfolio", Some(slug), None) if is_slug(slug) => {
                Self::Portfolio(Some(slug.to_string()))
            }
            ("booking", None, None) if *method == Method::POST => return Some(Self::CreateBooking),
            ("booking", None, None) => Self::Packages,
            ("personalities", None, None) => Self::Personalities,
            ("personalities", Some(slug), None) if is_slug(slug) => {
                Self::Personality(slug.to_string())
            }
            _ => return None,
        };

        matches!(*method, Method::GET | Method::HEAD).then_some(route)
    }
}

fn is_slug(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[derive(Serialize)]
struct PortfolioPage {
    categories: Vec<Category>,
    category: Option<Category>,
    photos: Vec<Photo>,
}

#[derive(Serialize)]
struct PackagesPage {
    packages: Vec<Package>,
}

#[derive(Serialize)]
struct PersonalitiesPage {
    personalities: Vec<Personality>,
}

#[derive(Serialize)]
struct PersonalityPage {
    personality: Personality,
    images: Vec<PersonalityImage>,
}

/// Answer a matched content route
pub async fn respond<B, F>(
    route: ContentRoute,
    body: B,
    state: &AppState<F>,
) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    F: AssetFs,
{
    let store = state.store.as_ref();
    let result = match route {
        ContentRoute::Portfolio(slug) => portfolio(store, slug.as_deref()).await,
        ContentRoute::Packages => Ok(build_json_response(
            StatusCode::OK,
            &PackagesPage {
                packages: store.packages().await,
            },
        )),
        ContentRoute::CreateBooking => {
            return create_booking(body, store, state.config.content.max_body_bytes).await;
        }
        ContentRoute::Personalities => Ok(build_json_response(
            StatusCode::OK,
            &PersonalitiesPage {
                personalities: store.personalities().await,
            },
        )),
        ContentRoute::Personality(slug) => personality(store, &slug).await,
    };

    result.unwrap_or_else(|e| store_error_response(&e))
}

async fn portfolio(
    store: &ContentStore,
    slug: Option<&str>,
) -> Result<Response<Full<Bytes>>, StoreError> {
    let category = match slug {
        Some(slug) => Some(store.category_by_slug(slug).await?),
        None => None,
    };
    let page = PortfolioPage {
        photos: store.photos(slug).await?,
        categories: store.categories().await,
        category,
    };
    Ok(build_json_response(StatusCode::OK, &page))
}

async fn personality(
    store: &ContentStore,
    slug: &str,
) -> Result<Response<Full<Bytes>>, StoreError> {
    let personality = store.personality_by_slug(slug).await?;
    let images = store.personality_images(personality.id).await?;
    Ok(build_json_response(
        StatusCode::OK,
        &PersonalityPage {
            personality,
            images,
        },
    ))
}

async fn create_booking<B>(body: B, store: &ContentStore, limit: usize) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let bytes = match Limited::new(body, limit).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            logger::log_warning(&format!("Booking body over {limit} bytes rejected"));
            return build_error_response(StatusCode::PAYLOAD_TOO_LARGE, "request body too large");
        }
        Err(e) => {
            logger::log_warning(&format!("Failed to read booking body: {e}"));
            return build_error_response(StatusCode::BAD_REQUEST, "failed to read request body");
        }
    };

    let form: CreateBooking = match serde_json::from_slice(&bytes) {
        Ok(form) => form,
        Err(e) => {
            return build_error_response(StatusCode::BAD_REQUEST, &format!("invalid booking: {e}"));
        }
    };

    match store.create_booking(form).await {
        Ok(booking) => build_json_response(StatusCode::CREATED, &booking),
        Err(e) => store_error_response(&e),
    }
}

fn store_error_response(err: &StoreError) -> Response<Full<Bytes>> {
    logger::log_store_error(err);
    let status = match err {
        StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
        StoreError::Validation(_) | StoreError::Image(_) => StatusCode::BAD_REQUEST,
        StoreError::DuplicateSlug { .. } => StatusCode::CONFLICT,
    };
    build_error_response(status, &err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::fs::testing::RecordingFs;
    use crate::assets::StaticAssetResponder;
    use crate::config::Config;
    use crate::http::cache::CachePolicy;
    use crate::media::testing::png_bytes;
    use crate::models::{
        BookingStatus, CreateCategory, CreatePackage, CreatePersonalityImage, DbId,
        PersonalityDraft, PhotoDraft,
    };
    use serde_json::{json, Value};

    fn state() -> AppState<RecordingFs> {
        let config = Config::defaults().unwrap();
        let fs = RecordingFs::default();
        let responder = StaticAssetResponder::with_fs(Vec::new(), CachePolicy::ONE_YEAR, fs);
        AppState::with_responder(config, responder)
    }

    async fn call(
        st: &AppState<RecordingFs>,
        route: ContentRoute,
        body: &str,
    ) -> (StatusCode, Value) {
        let resp = respond(route, Full::new(Bytes::from(body.to_string())), st).await;
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn add_package(st: &AppState<RecordingFs>) -> DbId {
        st.store
            .create_package(CreatePackage {
                name: "Wedding".into(),
                description: "Full day".into(),
                features: "8 hours\nTwo photographers".into(),
            })
            .await
            .unwrap()
            .id
    }

    fn booking_json(package_id: DbId) -> String {
        json!({
            "name": "Ana",
            "email": "ana@example.com",
            "phone": "555-0100",
            "date": "2026-11-02",
            "time": "14:30:00",
            "package_id": package_id,
            "message": "Garden ceremony"
        })
        .to_string()
    }

    #[test]
    fn test_route_matching() {
        let get = Method::GET;
        assert_eq!(
            ContentRoute::from_request(&get, "/portfolio/"),
            Some(ContentRoute::Portfolio(None))
        );
        assert_eq!(
            ContentRoute::from_request(&get, "/portfolio/weddings"),
            Some(ContentRoute::Portfolio(Some("weddings".into())))
        );
        assert_eq!(
            ContentRoute::from_request(&Method::HEAD, "/personalities/sarah/"),
            Some(ContentRoute::Personality("sarah".into()))
        );
        assert_eq!(ContentRoute::from_request(&get, "/booking/"), Some(ContentRoute::Packages));
        assert_eq!(
            ContentRoute::from_request(&Method::POST, "/booking/"),
            Some(ContentRoute::CreateBooking)
        );
    }

    #[test]
    fn test_non_routes_fall_through() {
        let get = Method::GET;
        assert_eq!(ContentRoute::from_request(&get, "/portfolio/cover.jpg"), None);
        assert_eq!(ContentRoute::from_request(&get, "/portfolio/a/b"), None);
        assert_eq!(ContentRoute::from_request(&get, "/css/site.css"), None);
        assert_eq!(ContentRoute::from_request(&get, "/"), None);
        assert_eq!(ContentRoute::from_request(&Method::POST, "/portfolio/"), None);
        assert_eq!(ContentRoute::from_request(&Method::DELETE, "/booking/"), None);
    }

    #[tokio::test]
    async fn test_booking_created_pending() {
        let st = state();
        let package_id = add_package(&st).await;

        let form = booking_json(package_id);
        let (status, body) = call(&st, ContentRoute::CreateBooking, &form).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "pending");
        assert_eq!(body["package_id"], package_id);
        assert_eq!(body["date"], "2026-11-02");

        let stored = st.store.bookings().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].status, BookingStatus::Pending);
    }

    #[tokio::test]
    async fn test_booking_unknown_package_is_404() {
        let st = state();
        let (status, body) = call(&st, ContentRoute::CreateBooking, &booking_json(42)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "package not found: 42");
        assert!(st.store.bookings().await.is_empty());
    }

    #[tokio::test]
    async fn test_booking_rejected_input_is_400() {
        let st = state();
        let package_id = add_package(&st).await;

        let bad_email = booking_json(package_id).replace("ana@example.com", "ana");
        let (status, _) = call(&st, ContentRoute::CreateBooking, &bad_email).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = call(&st, ContentRoute::CreateBooking, "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("invalid booking"));

        assert!(st.store.bookings().await.is_empty());
    }

    #[tokio::test]
    async fn test_oversized_booking_is_413() {
        let mut st = state();
        st.config.content.max_body_bytes = 32;
        let package_id = add_package(&st).await;
        let (status, _) = call(&st, ContentRoute::CreateBooking, &booking_json(package_id)).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_packages_listing() {
        let st = state();
        add_package(&st).await;
        let (status, body) = call(&st, ContentRoute::Packages, "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["packages"][0]["name"], "Wedding");
    }

    #[tokio::test]
    async fn test_portfolio_by_category() {
        let st = state();
        let weddings = st
            .store
            .create_category(CreateCategory {
                name: "Weddings".into(),
                slug: "weddings".into(),
                description: String::new(),
            })
            .await
            .unwrap();
        st.store
            .save_photo(
                PhotoDraft {
                    id: None,
                    title: "First dance".into(),
                    category_id: weddings.id,
                    image: "photos/dance.png".into(),
                    description: String::new(),
                    featured: true,
                    orientation: None,
                },
                &png_bytes(30, 60),
            )
            .await
            .unwrap();

        let (status, body) = call(&st, ContentRoute::Portfolio(None), "").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["category"].is_null());
        assert_eq!(body["photos"][0]["orientation"], "portrait");

        let (status, body) =
            call(&st, ContentRoute::Portfolio(Some("weddings".into())), "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["category"]["slug"], "weddings");
        assert_eq!(body["photos"].as_array().unwrap().len(), 1);

        let (status, _) = call(&st, ContentRoute::Portfolio(Some("events".into())), "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_personality_detail_with_images() {
        let st = state();
        let sarah = st
            .store
            .save_personality(
                PersonalityDraft {
                    id: None,
                    name: "Sarah".into(),
                    slug: "sarah".into(),
                    title: None,
                    short_description: "Lead photographer".into(),
                    full_description: "Ten years of weddings".into(),
                    featured_image: "personalities/sarah.png".into(),
                    orientation: None,
                },
                &png_bytes(60, 30),
            )
            .await
            .unwrap();
        st.store
            .add_personality_image(CreatePersonalityImage {
                personality_id: sarah.id,
                image: "personalities/sarah-2.png".into(),
                caption: "On location".into(),
            })
            .await
            .unwrap();

        let (status, body) = call(&st, ContentRoute::Personalities, "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["personalities"][0]["slug"], "sarah");

        let (status, body) = call(&st, ContentRoute::Personality("sarah".into()), "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["personality"]["title"], "Photographer");
        assert_eq!(body["images"][0]["caption"], "On location");

        let (status, _) = call(&st, ContentRoute::Personality("nobody".into()), "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
