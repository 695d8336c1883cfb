use maud::{Markup, Render, html};

pub const NAV_ITEMS: [(&str, &str); 5] = [
    ("/", "Dashboard"),
    ("/students", "Students"),
    ("/teachers", "Teachers"),
    ("/courses", "Courses"),
    ("/enrollments", "Enrollments"),
];

pub fn render_nav(current: &str) -> Markup {
    html! {
        nav class="w-full bg-gray-800 shadow-md mb-8" {
            div class="container mx-auto flex flex-row items-center space-x-4 px-4 py-3" {
                span class="text-xl font-bold mr-6" {"University Records"}
                @for (href, label) in NAV_ITEMS {
                    @if href == current {
                        a href=(href) class="bg-slate-600 font-bold py-2 px-4 rounded" aria-current="page" {(label)}
                    } @else {
                        a href=(href) class="hover:bg-slate-700 py-2 px-4 rounded" {(label)}
                    }
                }
            }
        }
    }
}

pub fn table(heading: impl Render, titles: &[&str], rows: Vec<Vec<Markup>>) -> Markup {
    html! {
        div class="container mx-auto" {
            (heading)
            div class="overflow-x-auto" {
                table class="min-w-full bg-gray-800 rounded shadow-md" {
                    thead class="bg-gray-700" {
                        tr {
                            @for title in titles {
                                th class="py-2 px-4 text-left font-semibold text-gray-300" {(title)}
                            }
                        }
                    }
                    tbody {
                        @for row in rows {
                            tr class="odd:bg-gray-800 even:bg-gray-750" {
                                @for col in row {
                                    td class="py-2 px-4 border-b border-gray-600 text-gray-200" {(col)}
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn title(s: impl Render) -> Markup {
    html! {
        h1 class="text-2xl font-semibold mb-4" {(s)}
    }
}

pub fn subtitle(s: impl Render) -> Markup {
    html! {
        h2 class="text-xl font-semibold mb-2" {(s)}
    }
}

pub fn form_element(id: &str, label: &str, element: Markup) -> Markup {
    html! {
        div class="mb-4" {
            label for=(id) class="block text-sm font-bold mb-2 text-gray-300" {(label)}
            (element)
        }
    }
}

pub fn simple_form_element(
    id: &str,
    label: &str,
    required: bool,
    ty: Option<&str>,
    value: Option<&str>,
) -> Markup {
    form_element(
        id,
        label,
        html! {
            input required[required] type=(ty.unwrap_or("text")) id=(id) name=(id) value=[value] class="shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600" {}
        },
    )
}

pub fn form_submit_button(text: Option<&str>) -> Markup {
    html! {
        button type="submit" class="bg-blue-500 hover:bg-blue-700 disabled:opacity-50 disabled:cursor-not-allowed font-bold py-2 px-4 rounded focus:outline-none focus:shadow-outline" {
            (text.unwrap_or("Submit"))
        }
    }
}

pub fn error_alert(desc: impl Render) -> Markup {
    html! {
        div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" role="alert" {
            strong class="font-bold" {"Error: "}
            span {(desc)}
        }
    }
}

pub fn success_alert(desc: impl Render) -> Markup {
    html! {
        div class="bg-green-100 border border-green-400 text-green-700 px-4 py-3 rounded relative mb-4" role="status" {
            span {(desc)}
        }
    }
}
