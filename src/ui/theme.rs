//! Shared class strings so forms and tables look the same on every screen.

pub fn btn_primary() -> &'static str {
    "rounded-lg bg-indigo-500 px-4 py-2 text-sm font-semibold text-white hover:bg-indigo-400"
}

pub fn btn_secondary() -> &'static str {
    "rounded-lg border border-slate-700 px-4 py-2 text-sm text-slate-300 transition hover:border-slate-600 hover:text-slate-100"
}

pub fn btn_link() -> &'static str {
    "text-xs font-semibold uppercase tracking-wide text-indigo-300 hover:text-indigo-100"
}

pub fn btn_danger_link() -> &'static str {
    "text-xs font-semibold uppercase tracking-wide text-rose-400 hover:text-rose-300"
}

pub fn input_class() -> &'static str {
    "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-indigo-500 focus:outline-none"
}

pub fn select_class() -> &'static str {
    "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-indigo-500 focus:outline-none"
}

pub fn label_class() -> &'static str {
    "block text-xs font-semibold uppercase text-slate-500"
}

pub fn panel() -> &'static str {
    "rounded-xl border border-slate-800 bg-slate-900/40 px-4 py-4"
}

pub fn card() -> &'static str {
    "rounded-xl border border-slate-800 bg-slate-900/40 p-4 shadow-sm"
}

pub fn table_container() -> &'static str {
    "overflow-hidden rounded-xl border border-slate-800"
}

pub fn table_header() -> &'static str {
    "bg-slate-900/60 text-left text-xs uppercase tracking-wide text-slate-500"
}

pub fn table_divider() -> &'static str {
    "divide-y divide-slate-800"
}
