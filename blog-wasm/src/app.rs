use crate::api::ApiClient;
use crate::board::{Board, BoardMsg, Effect, Entry, Field, SyncMode, CONTENT_PLACEHOLDER};
use crate::clock;
use crate::store::LocalStorageStore;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

const SYNC_MODE: Option<&str> = option_env!("BLOGIT_SYNC_MODE");

pub enum Msg {
    Board(BoardMsg),
    SearchInput(String),
    /// `force` is set by the search icon, Enter leaves it off.
    Search { force: bool },
    CreateBlog,
}

pub struct App {
    board: Board<LocalStorageStore>,
    search_input: String,
    api: ApiClient,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let mode = SyncMode::from_name(SYNC_MODE);
        log::info!("BlogIt front-end starting in {:?} mode", mode);

        ctx.link().send_message(Msg::Board(BoardMsg::Load));

        Self {
            board: Board::new(LocalStorageStore, mode),
            search_input: String::new(),
            api: ApiClient::new(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Board(msg) => {
                let effects = self.board.update(msg);
                for effect in effects {
                    self.run_effect(ctx, effect);
                }
                true
            }

            Msg::SearchInput(value) => {
                self.search_input = value;
                false
            }

            Msg::Search { force } => {
                let query = self.search_input.clone();
                ctx.link()
                    .send_message(Msg::Board(BoardMsg::Search { query, force }));
                false
            }

            Msg::CreateBlog => {
                let created_at = clock::local_timestamp();
                ctx.link()
                    .send_message(Msg::Board(BoardMsg::NewDraft { created_at }));
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let theme = if self.board.is_dark() { "dark" } else { "light" };

        html! {
            <div class={classes!("container", theme)}>
                { self.view_nav(ctx) }

                if self.board.is_loading() {
                    <div class="loading"> { "Loading..." } </div>
                }

                {
                    match self.board.error() {
                        Some(error) => html! {
                            <p class="error">{ format!("Error: {}", error) }</p>
                        },
                        None => html! {
                            <div class="blog-container">
                                { for self.board.entries().iter().map(|entry| self.view_entry(entry, ctx)) }
                            </div>
                        },
                    }
                }
            </div>
        }
    }
}

impl App {
    /// Runs the request in the background and feeds its outcome back to the
    /// board.
    fn run_effect(&self, ctx: &Context<Self>, effect: Effect) {
        let api = self.api.clone();
        let link = ctx.link().clone();

        spawn_local(async move {
            let msg = match effect {
                Effect::FetchAll => BoardMsg::loaded(api.list_blogs(None).await),
                Effect::Search(query) => {
                    let result = api.list_blogs(Some(&query)).await;
                    BoardMsg::searched(query, result)
                }
                Effect::Create { draft, request } => {
                    BoardMsg::created(draft, api.create_blog(&request).await)
                }
                Effect::Save(request) => {
                    BoardMsg::saved(request.id, api.save_blog(&request).await)
                }
                Effect::Delete(id) => BoardMsg::deleted(id, api.delete_blog(id).await),
                Effect::DeleteAll => BoardMsg::all_deleted(api.delete_all().await),
            };

            link.send_message(Msg::Board(msg));
        });
    }

    fn view_nav(&self, ctx: &Context<Self>) -> Html {
        let on_search_key = ctx.link().batch_callback(|e: KeyboardEvent| {
            (e.key() == "Enter").then_some(Msg::Search { force: false })
        });
        let theme_label = if self.board.is_dark() { "☀" } else { "☾" };

        html! {
            <nav>
                <h1 class="title" onclick={ctx.link().callback(|_| Msg::Board(BoardMsg::ShowAll))}>
                    { "BlogIt" }
                </h1>

                <div class="search-bar">
                    <input
                        type="text"
                        placeholder="Search"
                        value={self.search_input.clone()}
                        oninput={ctx.link().callback(|e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            Msg::SearchInput(input.value())
                        })}
                        onkeypress={on_search_key}
                    />
                    <button class="search-icon" onclick={ctx.link().callback(|_| Msg::Search { force: true })}>
                        { "🔍" }
                    </button>
                </div>

                <button class="theme-toggle" onclick={ctx.link().callback(|_| Msg::Board(BoardMsg::ToggleTheme))}>
                    { theme_label }
                </button>
                <button class="create" onclick={ctx.link().callback(|_| Msg::CreateBlog)}>
                    { "Create" }
                </button>
                <button class="clear" onclick={ctx.link().callback(|_| Msg::Board(BoardMsg::DeleteAll))}>
                    { "Delete All" }
                </button>
            </nav>
        }
    }

    fn view_entry(&self, entry: &Entry, ctx: &Context<Self>) -> Html {
        let key = entry.key;

        let title_handle = ctx.link().callback(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::Board(BoardMsg::Edit {
                key,
                field: Field::Title,
                value: input.value(),
            })
        });

        let content_handle = ctx.link().callback(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            Msg::Board(BoardMsg::Edit {
                key,
                field: Field::Content,
                value: input.value(),
            })
        });

        let save_handle = ctx.link().callback(move |_| Msg::Board(BoardMsg::Save(key)));
        let delete_handle = ctx.link().callback(move |_| Msg::Board(BoardMsg::Delete(key)));

        let class = classes!(
            "blogs",
            (!self.board.is_dark()).then_some("blog-color-change"),
            entry.hidden.then_some("hidden"),
        );

        html! {
            <section class={class} id={key.to_string()} key={entry.render_key().to_string()}>
                <input
                    type="text"
                    class="blog-title"
                    placeholder={entry.title_placeholder()}
                    value={entry.title.clone()}
                    oninput={title_handle}
                />
                <textarea
                    class="blog-content"
                    placeholder={CONTENT_PLACEHOLDER}
                    value={entry.content.clone()}
                    oninput={content_handle}
                />
                <small class="blog-date">{ &entry.created_at }</small>
                <div class="blog-actions">
                    <button class="save" disabled={!entry.can_save()} onclick={save_handle}>
                        { if entry.is_pending() { "Saving..." } else { "Save" } }
                    </button>
                    <button class="delete" onclick={delete_handle}>
                        { "Delete" }
                    </button>
                </div>
            </section>
        }
    }
}
