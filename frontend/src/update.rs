// frontend/src/update.rs
//
// Pure reducer: applies a message to the router state and returns the side
// effects to run. History and session are only touched by the driver in
// `state.rs`.
//
use crate::config::RouterConfig;
use crate::guard::{self, GuardDecision};
use crate::messages::{Command, Message};
use crate::routing::{Route, RouteTable};
use crate::session::Session;
use crate::state::RouterState;

/// Upper bound on redirects handled within one dispatch.
pub const MAX_REDIRECTS: u8 = 8;

pub struct UpdateContext<'a> {
    pub table: &'a RouteTable,
    pub config: &'a RouterConfig,
    pub session: &'a dyn Session,
}

pub fn update(state: &mut RouterState, msg: Message, ctx: &UpdateContext<'_>) -> Vec<Command> {
    let mut commands = Vec::new();

    match msg {
        Message::Navigate(location) => {
            commands.push(Command::PushHistory(location.clone()));
            commands.push(Command::SendMessage(Message::LocationChanged(location)));
        }

        Message::LocationChanged(location) => {
            state.redirect_from = None;
            apply_location(state, location, ctx, &mut commands);
        }

        Message::Redirected { to, from } => {
            state.redirects += 1;
            if state.redirects > MAX_REDIRECTS {
                crate::warn_log!("redirect limit reached at {}, rendering nothing", to);
                state.location = to;
                state.rendered = None;
                return commands;
            }
            state.redirect_from = from;
            apply_location(state, to, ctx, &mut commands);
        }

        Message::Logout => {
            let location = Route::Logout.path().to_string();
            commands.push(Command::PushHistory(location.clone()));
            commands.push(Command::SendMessage(Message::LocationChanged(location)));
        }
    }

    commands
}

fn apply_location(
    state: &mut RouterState,
    location: String,
    ctx: &UpdateContext<'_>,
    commands: &mut Vec<Command>,
) {
    let resolved = ctx.table.resolve(&location);
    crate::debug_log!("location {} -> {:?}", location, resolved.as_ref().map(|m| m.route));

    state.location = location;
    state.rendered = None;

    let Some(route_match) = resolved else {
        return;
    };

    match route_match.route {
        Route::Logout => {
            let home = ctx.config.home_path.clone();
            commands.push(Command::InvokeLogout);
            commands.push(Command::PushHistory(home.clone()));
            commands.push(Command::SendMessage(Message::Redirected {
                to: home,
                from: None,
            }));
        }
        route if route.is_guarded() => {
            match guard::check(ctx.session, &state.location, &ctx.config.login_path) {
                GuardDecision::Allow => state.rendered = Some(route_match),
                GuardDecision::Redirect { to, from } => {
                    commands.push(Command::ReplaceHistory(to.clone()));
                    commands.push(Command::SendMessage(Message::Redirected {
                        to,
                        from: Some(from),
                    }));
                }
            }
        }
        _ => state.rendered = Some(route_match),
    }
}
