//! # Message Components
//!
//! Button callbacks for the interactive task list.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 2.0.0: Task list protocol (page, select, done, snooze, delete, back)
//! - 1.0.0: Persona, confirmation and pagination buttons

use anyhow::Result;
use log::{info, warn};
use serenity::builder::CreateComponents;
use serenity::model::application::component::ButtonStyle;
use serenity::model::application::interaction::message_component::MessageComponentInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::CommandContext;
use crate::features::reminders::TaskStore;
use crate::features::task_list::{build_list_view, ButtonKind, ListAction, ListView, ListWindow};

/// Result of applying one list action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListUpdate {
    pub view: ListView,
    /// Shown ephemerally when a mutation matched no task
    pub notice: Option<&'static str>,
}

const NOT_FOUND_NOTICE: &str = "⚠️ That task no longer exists or is not yours.";

/// Handler for all message component interactions
pub struct MessageComponentHandler {
    ctx: Arc<CommandContext>,
}

impl MessageComponentHandler {
    pub fn new(ctx: Arc<CommandContext>) -> Self {
        Self { ctx }
    }

    /// Handle all types of component interactions
    pub async fn handle_component_interaction(
        &self,
        ctx: &Context,
        interaction: &MessageComponentInteraction,
    ) -> Result<()> {
        let custom_id = &interaction.data.custom_id;
        info!(
            "Processing component interaction: {custom_id} from user: {}",
            interaction.user.id
        );

        let Some(action) = ListAction::parse(custom_id) else {
            if ListAction::is_list_id(custom_id) {
                warn!("Malformed list callback id: {custom_id}");
            }
            interaction
                .create_interaction_response(&ctx.http, |response| {
                    response
                        .kind(InteractionResponseType::ChannelMessageWithSource)
                        .interaction_response_data(|message| {
                            message
                                .content("Unknown component interaction.")
                                .ephemeral(true)
                        })
                })
                .await?;
            return Ok(());
        };

        let user = self.ctx.resolve_user(&interaction.user).await?;
        let update = apply_list_action(&self.ctx.database, user.id, action).await?;

        interaction
            .create_interaction_response(&ctx.http, |response| {
                response
                    .kind(InteractionResponseType::UpdateMessage)
                    .interaction_response_data(|message| {
                        message
                            .content(&update.view.text)
                            .set_components(list_components(&update.view))
                    })
            })
            .await?;

        if let Some(notice) = update.notice {
            interaction
                .create_followup_message(&ctx.http, |message| {
                    message.content(notice).ephemeral(true)
                })
                .await?;
        }

        Ok(())
    }
}

/// Convert a rendered list view into Discord action rows
pub fn list_components(view: &ListView) -> CreateComponents {
    let mut components = CreateComponents::default();
    for row in &view.button_rows {
        components.create_action_row(|action_row| {
            for button in row {
                action_row.create_button(|b| {
                    b.custom_id(button.action.to_custom_id())
                        .label(&button.label)
                        .style(button_style(button.kind))
                });
            }
            action_row
        });
    }
    components
}

fn button_style(kind: ButtonKind) -> ButtonStyle {
    match kind {
        ButtonKind::Primary => ButtonStyle::Primary,
        ButtonKind::Secondary => ButtonStyle::Secondary,
        ButtonKind::Success => ButtonStyle::Success,
        ButtonKind::Danger => ButtonStyle::Danger,
    }
}

/// Count, clamp and fetch one page of the user's open tasks
///
/// A `selected` id that is not on the resulting page is dropped.
pub async fn load_list_view(
    store: &dyn TaskStore,
    user_id: i64,
    page: i64,
    limit: i64,
    selected: Option<i64>,
) -> Result<ListView> {
    let total = store.count_open(user_id).await?;
    let window = ListWindow::new(total, page, limit);
    let rows = store
        .list_open_paged(user_id, window.offset(), window.limit)
        .await?;
    let selected = selected.filter(|id| rows.iter().any(|task| task.id == *id));
    Ok(build_list_view(window, &rows, selected))
}

/// Apply a list callback for `user_id` and re-render the list
pub async fn apply_list_action(
    store: &dyn TaskStore,
    user_id: i64,
    action: ListAction,
) -> Result<ListUpdate> {
    let notice = |ok: bool| (!ok).then_some(NOT_FOUND_NOTICE);

    let update = match action {
        ListAction::Page { page, limit } | ListAction::Back { page, limit } => ListUpdate {
            view: load_list_view(store, user_id, page, limit, None).await?,
            notice: None,
        },
        ListAction::Select {
            task_id,
            page,
            limit,
        } => ListUpdate {
            view: load_list_view(store, user_id, page, limit, Some(task_id)).await?,
            notice: None,
        },
        ListAction::Done {
            task_id,
            page,
            limit,
        } => {
            let ok = store.mark_done(task_id, user_id).await?;
            ListUpdate {
                view: load_list_view(store, user_id, page, limit, None).await?,
                notice: notice(ok),
            }
        }
        ListAction::Delete {
            task_id,
            page,
            limit,
        } => {
            let ok = store.delete_task(task_id, user_id).await?;
            ListUpdate {
                view: load_list_view(store, user_id, page, limit, None).await?,
                notice: notice(ok),
            }
        }
        ListAction::Snooze {
            task_id,
            minutes,
            page,
            limit,
        } => {
            let ok = store.snooze(task_id, user_id, minutes).await?;
            ListUpdate {
                view: load_list_view(store, user_id, page, limit, Some(task_id)).await?,
                notice: notice(ok),
            }
        }
    };

    Ok(update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;
    use crate::database::Database;
    use crate::features::reminders::UserDirectory;

    async fn seeded(count: i64) -> (Database, i64, Vec<i64>) {
        let db = Database::in_memory()
            .await
            .unwrap()
            .with_clock(Arc::new(ManualClock::new(0)));
        let user = db.get_or_create_user(111, Some("alice")).await.unwrap();
        let mut ids = Vec::new();
        for i in 1..=count {
            ids.push(db.add_task(user.id, &format!("task {i}"), None, i).await.unwrap());
        }
        (db, user.id, ids)
    }

    #[tokio::test]
    async fn test_list_components_rows() {
        let (db, user_id, _) = seeded(7).await;
        let view = load_list_view(&db, user_id, 0, 5, None).await.unwrap();
        // Five select buttons, then the navigation row
        assert_eq!(list_components(&view).0.len(), 2);

        let empty = load_list_view(&db, 9999, 0, 5, None).await.unwrap();
        assert!(list_components(&empty).0.is_empty());
    }

    #[tokio::test]
    async fn test_load_list_view_pages() {
        let (db, user_id, _) = seeded(12).await;
        let view = load_list_view(&db, user_id, 2, 5, None).await.unwrap();
        assert!(view.text.contains("Page 3 of 3"));
        assert!(view.text.contains("Total: 12"));
        assert!(view.text.contains("task 11"));
        assert!(!view.text.contains("task 10"));
    }

    #[tokio::test]
    async fn test_page_beyond_end_is_clamped() {
        let (db, user_id, _) = seeded(3).await;
        let view = load_list_view(&db, user_id, 9, 5, None).await.unwrap();
        assert!(view.text.contains("Page 1 of 1"));
    }

    #[tokio::test]
    async fn test_select_shows_task_actions() {
        let (db, user_id, ids) = seeded(2).await;
        let update = apply_list_action(
            &db,
            user_id,
            ListAction::Select {
                task_id: ids[0],
                page: 0,
                limit: 5,
            },
        )
        .await
        .unwrap();

        let actions: Vec<ListAction> = update
            .view
            .button_rows
            .iter()
            .flatten()
            .map(|b| b.action)
            .collect();
        assert!(actions.contains(&ListAction::Done {
            task_id: ids[0],
            page: 0,
            limit: 5
        }));
        assert_eq!(update.notice, None);
    }

    #[tokio::test]
    async fn test_select_foreign_task_drops_selection() {
        let (db, user_id, _) = seeded(2).await;
        let bob = db.get_or_create_user(222, None).await.unwrap();
        let foreign = db.add_task(bob.id, "bob's", None, 5).await.unwrap();

        let view = load_list_view(&db, user_id, 0, 5, Some(foreign)).await.unwrap();
        assert!(!view.text.contains("→ "));
        assert!(view
            .button_rows
            .iter()
            .flatten()
            .all(|b| matches!(b.action, ListAction::Select { .. } | ListAction::Page { .. })));
    }

    #[tokio::test]
    async fn test_done_on_last_item_of_last_page_clamps() {
        let (db, user_id, ids) = seeded(6).await;
        let update = apply_list_action(
            &db,
            user_id,
            ListAction::Done {
                task_id: ids[5],
                page: 1,
                limit: 5,
            },
        )
        .await
        .unwrap();

        assert!(update.view.text.contains("Page 1 of 1"));
        assert!(update.view.text.contains("Total: 5"));
        assert_eq!(update.notice, None);
    }

    #[tokio::test]
    async fn test_delete_last_task_shows_empty_hint() {
        let (db, user_id, ids) = seeded(1).await;
        let update = apply_list_action(
            &db,
            user_id,
            ListAction::Delete {
                task_id: ids[0],
                page: 0,
                limit: 5,
            },
        )
        .await
        .unwrap();

        assert!(update.view.text.contains("/add"));
        assert!(update.view.button_rows.is_empty());
    }

    #[tokio::test]
    async fn test_snooze_keeps_selection() {
        let (db, user_id, ids) = seeded(2).await;
        let update = apply_list_action(
            &db,
            user_id,
            ListAction::Snooze {
                task_id: ids[1],
                minutes: 15,
                page: 0,
                limit: 5,
            },
        )
        .await
        .unwrap();

        assert!(update.view.text.contains("Snoozed until"));
        assert!(update.view.text.contains(&format!("→ 2) **task 2** · #{}", ids[1])));
        assert_eq!(update.notice, None);
    }

    #[tokio::test]
    async fn test_mutation_on_foreign_task_reports_notice() {
        let (db, _, _) = seeded(0).await;
        let bob = db.get_or_create_user(222, None).await.unwrap();
        let mallory = db.get_or_create_user(333, None).await.unwrap();
        let id = db.add_task(bob.id, "bob's", None, 5).await.unwrap();

        let update = apply_list_action(
            &db,
            mallory.id,
            ListAction::Done {
                task_id: id,
                page: 0,
                limit: 5,
            },
        )
        .await
        .unwrap();

        assert_eq!(update.notice, Some(NOT_FOUND_NOTICE));
        assert!(db.get_task(id, bob.id).await.unwrap().is_some());
    }
}
