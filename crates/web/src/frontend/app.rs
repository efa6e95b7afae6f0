//! Leptos application with routing.

use leptos::*;
use leptos_router::*;

use ems_auth::{Role, Session};

use crate::frontend::guard::ProtectedRoute;
use crate::frontend::stored_session;
use crate::frontend::theme_toggle::ThemeToggle;
use crate::theme::Theme;

/// Main application component.
///
/// Session and theme state are created here and passed down explicitly.
#[component]
pub fn App() -> impl IntoView {
    let (session, set_session) = create_signal(Session::loading());
    let theme = create_rw_signal(Theme::default());

    // Resolve once mounted; until then every protected route shows the spinner.
    create_effect(move |_| set_session.set(stored_session()));

    let session: Signal<Session> = session.into();

    view! {
        <Router>
            <nav class="navbar">
                <A href="/">"EMS"</A>
                <ThemeToggle theme=theme class="ms-auto"/>
            </nav>
            <main class="container-fluid mt-3 mb-5">
                <Routes>
                    <Route path="/" view=|| view! { <Section title="Home"/> }/>
                    <Route path="/auth" view=|| view! { <Section title="Sign in"/> }/>
                    <Route path="/companies" view=|| view! { <Section title="Companies"/> }/>

                    <Route path="/dashboard" view=move || view! {
                        <ProtectedRoute session=session><Section title="Dashboard"/></ProtectedRoute>
                    }/>
                    <Route path="/employees" view=move || view! {
                        <ProtectedRoute session=session><Section title="Employees"/></ProtectedRoute>
                    }/>
                    <Route path="/employees/add" view=move || view! {
                        <ProtectedRoute session=session><Section title="Add Employee"/></ProtectedRoute>
                    }/>
                    <Route path="/employees/edit/:id" view=move || view! {
                        <ProtectedRoute session=session><Section title="Edit Employee"/></ProtectedRoute>
                    }/>
                    <Route path="/employees/view/:id" view=move || view! {
                        <ProtectedRoute session=session><Section title="Employee Details"/></ProtectedRoute>
                    }/>
                    <Route path="/departments" view=move || view! {
                        <ProtectedRoute session=session><Section title="Departments"/></ProtectedRoute>
                    }/>
                    <Route path="/reports" view=move || view! {
                        <ProtectedRoute session=session><Section title="Reports"/></ProtectedRoute>
                    }/>
                    <Route path="/profile" view=move || view! {
                        <ProtectedRoute session=session><Section title="Profile"/></ProtectedRoute>
                    }/>
                    <Route path="/settings" view=move || view! {
                        <ProtectedRoute session=session><Section title="Settings"/></ProtectedRoute>
                    }/>
                    <Route path="/notifications" view=move || view! {
                        <ProtectedRoute session=session><Section title="Notifications"/></ProtectedRoute>
                    }/>
                    <Route path="/admin" view=move || view! {
                        <ProtectedRoute session=session required_role=Role::ADMIN>
                            <Section title="Admin Control Panel"/>
                        </ProtectedRoute>
                    }/>

                    <Route path="/*any" view=|| view! { <Redirect path="/"/> }/>
                </Routes>
            </main>
        </Router>
    }
}

/// Placeholder body for a routed page.
#[component]
fn Section(#[prop(into)] title: String) -> impl IntoView {
    view! {
        <section>
            <h2>{title}</h2>
        </section>
    }
}
