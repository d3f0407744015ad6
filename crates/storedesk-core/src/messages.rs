use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    #[default]
    Tr,
}

/// Catalog of every user-facing string the flows and screens show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Messages {
    locale: Locale,
}

impl Messages {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    fn pick(&self, en: &'static str, tr: &'static str) -> &'static str {
        match self.locale {
            Locale::En => en,
            Locale::Tr => tr,
        }
    }

    pub fn name_too_short(&self) -> &'static str {
        self.pick(
            "Store name must be at least 4 characters",
            "Mağaza adı en az 4 harften oluşmalıdır",
        )
    }

    pub fn generic_failure(&self) -> &'static str {
        self.pick("Something went wrong.", "Bir şeyler ters gitti.")
    }

    pub fn store_updated(&self) -> &'static str {
        self.pick("Store updated.", "Mağaza bilgileri güncellendi")
    }

    pub fn store_deleted(&self) -> &'static str {
        self.pick("Store deleted.", "Mağaza başarıyla silindi")
    }

    pub fn delete_blocked(&self) -> &'static str {
        self.pick(
            "Make sure you removed all products and categories using this store first.",
            "Mağazayı Silmeden önce, ürünleri ve kategorileri sildiğinizden emin olun",
        )
    }

    pub fn store_not_found(&self) -> &'static str {
        self.pick("Store not found.", "Mağaza bulunamadı.")
    }

    pub fn create_title(&self) -> &'static str {
        self.pick("Create store", "Mağaza oluştur")
    }

    pub fn create_description(&self) -> &'static str {
        self.pick(
            "Add a new store to manage products and categories.",
            "Ürünlerinizi sergileyeceğiniz yeni bir mağaza oluşturun!",
        )
    }

    pub fn name_label(&self) -> &'static str {
        self.pick("Name", "Mağaza Adı")
    }

    pub fn name_placeholder(&self) -> &'static str {
        self.pick("E-Commerce", "E-Ticaret")
    }

    pub fn cancel(&self) -> &'static str {
        self.pick("Cancel", "Vazgeç")
    }

    pub fn proceed(&self) -> &'static str {
        self.pick("Continue", "Devam et")
    }

    pub fn settings_title(&self) -> &'static str {
        self.pick("Settings", "Ayarlar")
    }

    pub fn settings_description(&self) -> &'static str {
        self.pick("Manage store preferences", "Mağaza bilgileri düzenle")
    }

    pub fn save_changes(&self) -> &'static str {
        self.pick("Save changes", "Değişiklikleri Kaydet")
    }

    pub fn delete_store(&self) -> &'static str {
        self.pick("Delete store", "Mağazayı sil")
    }

    pub fn confirm_title(&self) -> &'static str {
        self.pick("Are you sure?", "Emin misiniz?")
    }

    pub fn confirm_description(&self) -> &'static str {
        self.pick("This action cannot be undone.", "Bu işlem geri alınamaz.")
    }

    pub fn stores_title(&self) -> &'static str {
        self.pick("Stores", "Mağazalar")
    }

    pub fn no_stores(&self) -> &'static str {
        self.pick("No stores yet.", "Henüz mağaza yok.")
    }

    pub fn public_badge(&self) -> &'static str {
        self.pick("Public", "Herkese açık")
    }

    pub fn please_wait(&self) -> &'static str {
        self.pick("Please wait...", "Lütfen bekleyin...")
    }
}
