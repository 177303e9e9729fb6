//! Read-model assembly for threads and civis.
//!
//! Derives the three per-thread views that are never stored and must be
//! recomputed on every read:
//!
//! - each civi's score from the activity log,
//! - the distinct set of contributing profiles,
//! - the requesting viewer's past activity on the thread's civis.
//!
//! All three degrade to zero/empty defaults for anonymous or unresolvable
//! viewers; an unauthenticated read never errors, it under-reports.

use std::collections::HashMap;

use agora_core::civi::ActivityType;
use agora_core::error::CoreError;
use agora_core::scoring::civi_score;
use agora_core::types::{DbId, Timestamp};
use serde::Serialize;

use agora_db::models::activity::UserVote;
use agora_db::models::category::Category;
use agora_db::models::civi::{Civi, VoteTally};
use agora_db::models::civi_image::CiviImage;
use agora_db::models::profile::Profile;
use agora_db::models::thread::Thread;
use agora_db::repositories::{ActivityRepo, CiviImageRepo, CiviRepo, ProfileRepo};
use agora_db::PgPool;

use crate::error::{AppError, AppResult};

/// Public identity record nested inside thread and civi responses.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub id: DbId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub profile_image_url: Option<String>,
}

impl From<&Profile> for ProfileView {
    fn from(p: &Profile) -> Self {
        ProfileView {
            id: p.id,
            username: p.username.clone(),
            first_name: p.first_name.clone(),
            last_name: p.last_name.clone(),
            profile_image_url: p.profile_image_url.clone(),
        }
    }
}

/// Category record nested inside thread responses.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub id: DbId,
    pub name: String,
}

impl From<&Category> for CategoryView {
    fn from(c: &Category) -> Self {
        CategoryView {
            id: c.id,
            name: c.name.clone(),
        }
    }
}

/// Category record with the viewer-relative `preferred` flag.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryPrefView {
    pub id: DbId,
    pub name: String,
    pub preferred: bool,
}

/// Attachment record nested inside civi responses.
#[derive(Debug, Clone, Serialize)]
pub struct CiviImageView {
    pub id: DbId,
    #[serde(rename = "civi")]
    pub civi_id: DbId,
    pub title: String,
    pub image_url: String,
    pub created: Timestamp,
}

impl From<&CiviImage> for CiviImageView {
    fn from(i: &CiviImage) -> Self {
        CiviImageView {
            id: i.id,
            civi_id: i.civi_id,
            title: i.title.clone(),
            image_url: i.image_url.clone(),
            created: i.created_at,
        }
    }
}

/// Full civi record as served inside thread detail and civi endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct CiviView {
    pub id: DbId,
    #[serde(rename = "thread")]
    pub thread_id: DbId,
    #[serde(rename = "type")]
    pub c_type: String,
    pub title: String,
    pub body: String,
    pub author: ProfileView,
    pub created: Timestamp,
    pub last_modified: Timestamp,
    pub votes: VoteTally,
    /// Attachment URLs only.
    pub images: Vec<String>,
    pub linked_civis: Vec<DbId>,
    /// Same ids as `linked_civis`; kept as a separate field for wire
    /// compatibility with the original API.
    pub links: Vec<DbId>,
    pub responses: i64,
    /// Derived per read; 0 for anonymous viewers.
    pub score: i64,
    pub attachments: Vec<CiviImageView>,
}

/// Thread record for list endpoints (no civis or viewer-derived data).
#[derive(Debug, Clone, Serialize)]
pub struct ThreadView {
    pub id: DbId,
    pub title: String,
    pub summary: String,
    pub author: ProfileView,
    pub category: CategoryView,
    pub image_url: Option<String>,
    pub created: Timestamp,
    pub level: String,
    pub state: String,
    pub is_draft: bool,
    pub num_views: i64,
    pub num_civis: i64,
    pub num_solutions: i64,
}

/// Thread detail: the list shape plus civis, contributors, and the
/// viewer's past votes.
#[derive(Debug, Clone, Serialize)]
pub struct ThreadDetailView {
    pub id: DbId,
    pub title: String,
    pub summary: String,
    pub author: ProfileView,
    pub category: CategoryView,
    pub image_url: Option<String>,
    pub created: Timestamp,
    pub level: String,
    pub state: String,
    pub is_draft: bool,
    pub num_views: i64,
    pub num_civis: i64,
    pub num_solutions: i64,
    pub civis: Vec<CiviView>,
    pub contributors: Vec<ProfileView>,
    pub user_votes: Vec<UserVote>,
}

/// Fetch the author and category rows a thread view nests.
async fn thread_refs(pool: &PgPool, thread: &Thread) -> AppResult<(ProfileView, CategoryView)> {
    let author = ProfileRepo::find_by_id(pool, thread.author_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found(
            "Profile",
            thread.author_id,
        )))?;
    let category = agora_db::repositories::CategoryRepo::find_by_id(pool, thread.category_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found(
            "Category",
            thread.category_id,
        )))?;
    Ok((ProfileView::from(&author), CategoryView::from(&category)))
}

/// Assemble the list shape for one thread.
pub async fn thread_view(pool: &PgPool, thread: Thread) -> AppResult<ThreadView> {
    let (author, category) = thread_refs(pool, &thread).await?;
    Ok(ThreadView {
        id: thread.id,
        title: thread.title,
        summary: thread.summary,
        author,
        category,
        image_url: thread.image_url,
        created: thread.created_at,
        level: thread.level,
        state: thread.state,
        is_draft: thread.is_draft,
        num_views: thread.num_views,
        num_civis: thread.num_civis,
        num_solutions: thread.num_solutions,
    })
}

/// Assemble one civi on its own (detail and response endpoints).
///
/// `scored` is whether the viewer resolved to a profile; anonymous reads
/// always score 0.
pub async fn civi_view(pool: &PgPool, civi: Civi, scored: bool) -> AppResult<CiviView> {
    let author = ProfileRepo::find_by_id(pool, civi.author_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found(
            "Profile",
            civi.author_id,
        )))?;
    let attachments = CiviImageRepo::list_by_civi(pool, civi.id).await?;
    let linked = CiviRepo::linked_ids(pool, civi.id).await?;

    let score = if scored {
        let votes = latest_vote_kinds(ActivityRepo::latest_votes_for_civi(pool, civi.id).await?);
        civi_score(&votes)
    } else {
        0
    };

    Ok(assemble_civi(
        civi,
        ProfileView::from(&author),
        attachments.iter().map(CiviImageView::from).collect(),
        linked,
        score,
    ))
}

/// Assemble every civi in a thread with four batch queries (civis, authors,
/// attachments, links) plus one latest-votes query when the viewer is
/// authenticated -- never one query per civi.
pub async fn civis_for_thread(
    pool: &PgPool,
    thread_id: DbId,
    scored: bool,
) -> AppResult<Vec<CiviView>> {
    let civis = CiviRepo::list_by_thread(pool, thread_id).await?;
    let authors: HashMap<DbId, ProfileView> = ProfileRepo::thread_contributors(pool, thread_id)
        .await?
        .iter()
        .map(|p| (p.id, ProfileView::from(p)))
        .collect();

    let mut images_by_civi: HashMap<DbId, Vec<CiviImageView>> = HashMap::new();
    for image in CiviImageRepo::list_by_thread(pool, thread_id).await? {
        images_by_civi
            .entry(image.civi_id)
            .or_default()
            .push(CiviImageView::from(&image));
    }

    let mut links_by_civi: HashMap<DbId, Vec<DbId>> = HashMap::new();
    for link in CiviRepo::links_for_thread(pool, thread_id).await? {
        links_by_civi
            .entry(link.civi_id)
            .or_default()
            .push(link.linked_civi_id);
    }

    let mut votes_by_civi: HashMap<DbId, Vec<ActivityType>> = HashMap::new();
    if scored {
        for vote in ActivityRepo::latest_votes_for_thread(pool, thread_id).await? {
            // The log only ever contains known vote kinds.
            if let Ok(kind) = vote.activity_type.parse::<ActivityType>() {
                votes_by_civi.entry(vote.civi_id).or_default().push(kind);
            }
        }
    }

    let mut views = Vec::with_capacity(civis.len());
    for civi in civis {
        let author = authors
            .get(&civi.author_id)
            .cloned()
            .ok_or(AppError::Core(CoreError::not_found(
                "Profile",
                civi.author_id,
            )))?;
        let attachments = images_by_civi.remove(&civi.id).unwrap_or_default();
        let linked = links_by_civi.remove(&civi.id).unwrap_or_default();
        let score = if scored {
            civi_score(votes_by_civi.get(&civi.id).map_or(&[], Vec::as_slice))
        } else {
            0
        };
        views.push(assemble_civi(civi, author, attachments, linked, score));
    }
    Ok(views)
}

/// Assemble the full thread detail, including the three derived views.
pub async fn thread_detail(
    pool: &PgPool,
    thread: Thread,
    viewer_profile: Option<&Profile>,
) -> AppResult<ThreadDetailView> {
    let (author, category) = thread_refs(pool, &thread).await?;
    let civis = civis_for_thread(pool, thread.id, viewer_profile.is_some()).await?;

    let contributors: Vec<ProfileView> = ProfileRepo::thread_contributors(pool, thread.id)
        .await?
        .iter()
        .map(ProfileView::from)
        .collect();

    let user_votes = match viewer_profile {
        Some(profile) => ActivityRepo::user_votes(pool, thread.id, profile.id).await?,
        None => Vec::new(),
    };

    Ok(ThreadDetailView {
        id: thread.id,
        title: thread.title,
        summary: thread.summary,
        author,
        category,
        image_url: thread.image_url,
        created: thread.created_at,
        level: thread.level,
        state: thread.state,
        is_draft: thread.is_draft,
        num_views: thread.num_views,
        num_civis: thread.num_civis,
        num_solutions: thread.num_solutions,
        civis,
        contributors,
        user_votes,
    })
}

fn assemble_civi(
    civi: Civi,
    author: ProfileView,
    attachments: Vec<CiviImageView>,
    linked_civis: Vec<DbId>,
    score: i64,
) -> CiviView {
    CiviView {
        id: civi.id,
        thread_id: civi.thread_id,
        c_type: civi.c_type.clone(),
        title: civi.title.clone(),
        body: civi.body.clone(),
        author,
        created: civi.created_at,
        last_modified: civi.updated_at,
        votes: civi.tally(),
        images: attachments.iter().map(|a| a.image_url.clone()).collect(),
        links: linked_civis.clone(),
        linked_civis,
        responses: civi.responses,
        score,
        attachments,
    }
}

fn latest_vote_kinds(rows: Vec<agora_db::models::activity::LatestVote>) -> Vec<ActivityType> {
    rows.iter()
        .filter_map(|r| r.activity_type.parse().ok())
        .collect()
}
