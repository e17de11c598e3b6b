/// Slide-in panels of the header: the section menu and the gym switcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Menu,
    Sites,
}

impl Panel {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "menu" => Some(Panel::Menu),
            "sites" => Some(Panel::Sites),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Panels {
    menu: bool,
    sites: bool,
}

impl Panels {
    pub fn is_open(&self, panel: Panel) -> bool {
        match panel {
            Panel::Menu => self.menu,
            Panel::Sites => self.sites,
        }
    }

    /// Open `panel`. Panels are mutually exclusive, so the other one closes.
    pub fn open(&mut self, panel: Panel) {
        self.dismiss_all();
        match panel {
            Panel::Menu => self.menu = true,
            Panel::Sites => self.sites = true,
        }
    }

    /// Escape, a click outside or an opening dialog closes every panel.
    pub fn dismiss_all(&mut self) {
        self.menu = false;
        self.sites = false;
    }
}
