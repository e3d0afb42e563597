mod filter_bar;
mod post_input;
mod results;
mod sidebar;
mod top_bar;
