use yew::prelude::*;

use crate::config::{self, SocialIcon};

/// Outbound links open in a new browsing context without access to this page.
pub const OUTBOUND_TARGET: &str = "_blank";
pub const OUTBOUND_REL: &str = "noopener noreferrer";

#[derive(Clone, PartialEq, Debug)]
pub struct FooterLink {
    pub href: &'static str,
    pub icon: SocialIcon,
    pub target: &'static str,
    pub rel: &'static str,
}

pub fn footer_links() -> Vec<FooterLink> {
    config::FOOTER_LINKS
        .iter()
        .map(|&(href, icon)| FooterLink {
            href,
            icon,
            target: OUTBOUND_TARGET,
            rel: OUTBOUND_REL,
        })
        .collect()
}

#[function_component(Footer)]
pub fn footer() -> Html {
    html! {
        <footer class="site-footer">
            <style>
                {r#"
                    .site-footer {
                        width: 100vw;
                        background-color: #c4b5fd;
                        padding: 1rem 0;
                        color: #000;
                    }
                    .site-footer .footer-inner {
                        margin: 0 auto;
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        justify-content: space-between;
                        gap: 1rem;
                        padding: 0 1rem;
                        max-width: 1280px;
                    }
                    .site-footer .footer-socials {
                        display: flex;
                        justify-content: center;
                        gap: 1rem;
                    }
                    .site-footer .footer-socials a {
                        color: #000;
                        transition: color 500ms ease-in-out;
                    }
                    .site-footer .footer-socials a:hover {
                        color: #fff;
                    }
                    .site-footer .footer-privacy {
                        text-align: center;
                        font-size: 0.875rem;
                        color: inherit;
                        text-decoration: none;
                    }
                    .site-footer .footer-privacy:hover {
                        text-decoration: underline;
                    }
                    @media (min-width: 768px) {
                        .site-footer .footer-inner {
                            flex-direction: row;
                        }
                        .site-footer .footer-socials {
                            justify-content: flex-start;
                        }
                        .site-footer .footer-privacy {
                            text-align: right;
                        }
                    }
                "#}
            </style>
            <div class="footer-inner">
                <p>{config::COPYRIGHT}</p>

                <div class="footer-socials">
                    { for footer_links().into_iter().map(|link| html! {
                        <a
                            href={link.href}
                            target={link.target}
                            rel={link.rel}
                            aria-label={link.icon.label()}
                        >
                            <i class={link.icon.class_name()}></i>
                        </a>
                    }) }
                </div>
                <a href={config::PRIVACY_ANCHOR} class="footer-privacy">
                    {"Privacy Policy"}
                </a>
            </div>
        </footer>
    }
}
