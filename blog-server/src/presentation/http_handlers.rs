use crate::application::BlogService;
use crate::domain::blog::{BlogsResponse, CreateBlogRequest, SaveBlogRequest, SearchQuery};
use crate::domain::DomainError;
use crate::presentation::payload::Payload;
use actix_web::http::{header::ContentType, StatusCode};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

fn text_response(status: StatusCode, body: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header(ContentType::plaintext())
        .body(body.into())
}

// DomainError -> plain-text HttpResponse
pub fn error_to_response(err: DomainError) -> HttpResponse {
    let status = StatusCode::from_u16(err.to_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
        tracing::error!("Request failed: {}", err);
    } else {
        tracing::debug!("Request rejected: {}", err);
    }

    text_response(status, err.public_message())
}

fn parse_id(raw: &str) -> Result<i64, DomainError> {
    raw.trim()
        .parse()
        .map_err(|_| DomainError::InvalidInput(format!("invalid blog id {:?}", raw)))
}

pub async fn list_blogs(
    blog_service: web::Data<Arc<BlogService>>,
    query: web::Query<SearchQuery>,
) -> impl Responder {
    let search = query.into_inner().search;

    tracing::info!("Listing blogs, search={:?}", search);

    match blog_service.list_blogs(search).await {
        Ok(blogs) => HttpResponse::Ok().json(BlogsResponse { blogs }),
        Err(err) => error_to_response(err),
    }
}

pub async fn get_blog(
    blog_service: web::Data<Arc<BlogService>>,
    path: web::Path<String>,
) -> impl Responder {
    let blog_id = match parse_id(&path) {
        Ok(id) => id,
        Err(err) => return error_to_response(err),
    };

    tracing::info!("Getting blog with id={}", blog_id);

    match blog_service.get_blog(blog_id).await {
        Ok(blog) => HttpResponse::Ok().json(blog),
        Err(err) => error_to_response(err),
    }
}

pub async fn create_blog(
    blog_service: web::Data<Arc<BlogService>>,
    body: Payload<CreateBlogRequest>,
) -> impl Responder {
    tracing::info!("Creating blog");

    match blog_service.create_blog(body.into_inner()).await {
        Ok(created) => HttpResponse::Ok().json(created),
        Err(err) => error_to_response(err),
    }
}

pub async fn save_blog(
    blog_service: web::Data<Arc<BlogService>>,
    body: Payload<SaveBlogRequest>,
) -> impl Responder {
    let req = body.into_inner();

    tracing::info!("Saving blog id={:?}", req.id);

    match blog_service.save_blog(req).await {
        Ok(()) => text_response(StatusCode::OK, "successfully saved blog"),
        Err(err) => error_to_response(err),
    }
}

pub async fn delete_all_blogs(blog_service: web::Data<Arc<BlogService>>) -> impl Responder {
    tracing::info!("Deleting all blogs");

    match blog_service.delete_all_blogs().await {
        Ok(()) => text_response(StatusCode::OK, "successfully deleted all blogs"),
        Err(err) => error_to_response(err),
    }
}

pub async fn delete_blog(
    blog_service: web::Data<Arc<BlogService>>,
    path: web::Path<String>,
) -> impl Responder {
    let raw_id = path.into_inner();

    tracing::info!("Deleting blog id={}", raw_id);

    // A non-numeric id matches no row; the confirmation is still sent.
    let result = match raw_id.trim().parse::<i64>() {
        Ok(id) => blog_service.delete_blog(id).await,
        Err(_) => Ok(()),
    };

    match result {
        Ok(()) => text_response(
            StatusCode::OK,
            format!("successfully deleted blog {}", raw_id),
        ),
        Err(err) => error_to_response(err),
    }
}
