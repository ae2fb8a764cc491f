//! The navigation bar shown on every signed-in page.
//!
//! Large screens get a row of links in the header, small screens get a tab
//! bar fixed to the bottom of the screen.

use maud::{Markup, html};

use crate::{endpoints, html::feather_icon};

/// A link in the navigation bar.
///
/// It will change appearance if `is_current` is set to
/// `true`. Only one link should be set as active at any one time.
#[derive(Clone)]
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    icon: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_desktop_html(self) -> Markup {
        let style = if self.is_current {
            "block py-2 px-3 text-orange-500 font-semibold lg:p-0"
        } else {
            "block py-2 px-3 text-gray-900 hover:text-orange-500 lg:p-0 dark:text-white"
        };

        html!( a href=(self.url) class=(style) { (self.title) } )
    }

    fn into_tab_html(self) -> Markup {
        let style = if self.is_current {
            "flex flex-col items-center gap-1 py-2 text-xs font-semibold text-orange-500"
        } else {
            "flex flex-col items-center gap-1 py-2 text-xs text-gray-500 \
            hover:text-orange-500 dark:text-gray-300"
        };

        html! {
            a
                href=(self.url)
                class=(style)
                aria-current=[self.is_current.then_some("page")]
            {
                (feather_icon(self.icon, "w-5 h-5 stroke-current fill-none"))
                span { (self.title) }
            }
        }
    }
}

pub struct NavBar<'a> {
    links: Vec<Link<'a>>,
}

impl NavBar<'_> {
    /// Get the navigation bar.
    ///
    /// If a link matches `active_endpoint`, then that link will be
    /// marked as active and displayed differently in the HTML.
    pub fn new(active_endpoint: &str) -> NavBar<'_> {
        let link = |url, title, icon| Link {
            url,
            title,
            icon,
            is_current: active_endpoint == url,
        };

        let links = vec![
            link(endpoints::DASHBOARD_VIEW, "Listagem", "list"),
            link(endpoints::NEW_TRANSACTION_VIEW, "Cadastrar", "dollar-sign"),
            link(endpoints::RESUME_VIEW, "Resumo", "pie-chart"),
            link(endpoints::PROFILE_VIEW, "Perfil", "user"),
            Link {
                url: endpoints::LOG_OUT,
                title: "Sair",
                icon: "power",
                is_current: false,
            },
        ];

        NavBar { links }
    }

    pub fn into_html(self) -> Markup {
        let links = self.links;

        html!(
            nav class="bg-white border-gray-200 dark:bg-gray-900"
            {
                div
                    class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4"
                {
                    a href="/" class="flex items-center space-x-3"
                    {
                        img src="/static/favicon.svg" alt="GoFinances" class="h-8";

                        span
                            class="self-center text-2xl font-semibold whitespace-nowrap dark:text-white"
                        {
                            "GoFinances"
                        }
                    }

                    div class="hidden lg:block lg:w-auto"
                    {
                        ul class="font-medium flex flex-row space-x-8"
                        {
                            @for link in links.iter().cloned() {
                                li { (link.into_desktop_html()) }
                            }
                        }
                    }
                }
            }

            nav class="fixed inset-x-0 bottom-0 z-40 lg:hidden bg-white dark:bg-gray-900 \
                border-t border-gray-200 dark:border-gray-700"
            {
                ul class="grid grid-cols-5" aria-label="Principal"
                {
                    @for link in links {
                        li { (link.into_tab_html()) }
                    }
                }
            }
        )
    }
}
