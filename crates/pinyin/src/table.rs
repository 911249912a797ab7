//! Built-in tone-marked pinyin table for common characters.
//!
//! Contract:
//! - Lookup is exact per character; no tone-sandhi or word-level context.
//! - Characters outside the table render as `None` (annotate nothing), so a
//!   partial table degrades coverage, never correctness.
//! - Entries are sorted once at construction; lookups are binary searches.

use crate::{ScriptProvider, is_chinese_char};

/// (character, tone-marked pinyin) pairs; order here is editorial, sorted in
/// `PinyinTable::new`.
const RENDERINGS: &[(char, &str)] = &[
    ('我', "wǒ"),
    ('你', "nǐ"),
    ('他', "tā"),
    ('她', "tā"),
    ('它', "tā"),
    ('们', "men"),
    ('的', "de"),
    ('了', "le"),
    ('是', "shì"),
    ('在', "zài"),
    ('有', "yǒu"),
    ('不', "bù"),
    ('一', "yī"),
    ('二', "èr"),
    ('三', "sān"),
    ('四', "sì"),
    ('五', "wǔ"),
    ('六', "liù"),
    ('七', "qī"),
    ('八', "bā"),
    ('九', "jiǔ"),
    ('十', "shí"),
    ('人', "rén"),
    ('大', "dà"),
    ('小', "xiǎo"),
    ('中', "zhōng"),
    ('国', "guó"),
    ('爱', "ài"),
    ('好', "hǎo"),
    ('天', "tiān"),
    ('地', "dì"),
    ('上', "shàng"),
    ('下', "xià"),
    ('来', "lái"),
    ('去', "qù"),
    ('会', "huì"),
    ('说', "shuō"),
    ('话', "huà"),
    ('看', "kàn"),
    ('见', "jiàn"),
    ('听', "tīng"),
    ('读', "dú"),
    ('写', "xiě"),
    ('学', "xué"),
    ('生', "shēng"),
    ('老', "lǎo"),
    ('师', "shī"),
    ('年', "nián"),
    ('月', "yuè"),
    ('日', "rì"),
    ('时', "shí"),
    ('分', "fēn"),
    ('家', "jiā"),
    ('水', "shuǐ"),
    ('火', "huǒ"),
    ('山', "shān"),
    ('风', "fēng"),
    ('雨', "yǔ"),
    ('花', "huā"),
    ('草', "cǎo"),
    ('树', "shù"),
    ('鸟', "niǎo"),
    ('鱼', "yú"),
    ('马', "mǎ"),
    ('牛', "niú"),
    ('羊', "yáng"),
    ('猫', "māo"),
    ('狗', "gǒu"),
    ('吃', "chī"),
    ('喝', "hē"),
    ('走', "zǒu"),
    ('跑', "pǎo"),
    ('飞', "fēi"),
    ('开', "kāi"),
    ('关', "guān"),
    ('门', "mén"),
    ('车', "chē"),
    ('路', "lù"),
    ('城', "chéng"),
    ('市', "shì"),
    ('北', "běi"),
    ('南', "nán"),
    ('东', "dōng"),
    ('西', "xī"),
    ('京', "jīng"),
    ('海', "hǎi"),
    ('河', "hé"),
    ('湖', "hú"),
    ('江', "jiāng"),
    ('长', "cháng"),
    ('高', "gāo"),
    ('新', "xīn"),
    ('旧', "jiù"),
    ('多', "duō"),
    ('少', "shǎo"),
    ('心', "xīn"),
    ('手', "shǒu"),
    ('口', "kǒu"),
    ('目', "mù"),
    ('头', "tóu"),
    ('文', "wén"),
    ('字', "zì"),
    ('语', "yǔ"),
    ('言', "yán"),
    ('汉', "hàn"),
    ('和', "hé"),
    ('很', "hěn"),
    ('也', "yě"),
    ('都', "dōu"),
    ('这', "zhè"),
    ('那', "nà"),
    ('什', "shén"),
    ('么', "me"),
    ('谁', "shéi"),
    ('要', "yào"),
    ('想', "xiǎng"),
    ('知', "zhī"),
    ('道', "dào"),
    ('再', "zài"),
    ('世', "shì"),
    ('界', "jiè"),
    ('今', "jīn"),
    ('明', "míng"),
    ('白', "bái"),
    ('黑', "hēi"),
    ('红', "hóng"),
    ('电', "diàn"),
    ('脑', "nǎo"),
    ('网', "wǎng"),
    ('页', "yè"),
    ('朋', "péng"),
    ('友', "yǒu"),
    ('谢', "xiè"),
    ('请', "qǐng"),
    ('问', "wèn"),
    ('没', "méi"),
    ('用', "yòng"),
    ('可', "kě"),
    ('以', "yǐ"),
    ('能', "néng"),
    ('还', "hái"),
    ('就', "jiù"),
    ('儿', "ér"),
    ('子', "zǐ"),
    ('女', "nǚ"),
    ('男', "nán"),
    ('王', "wáng"),
    ('李', "lǐ"),
    ('张', "zhāng"),
    ('刘', "liú"),
    ('陈', "chén"),
];

#[derive(Clone)]
pub struct PinyinTable {
    entries: Vec<(char, &'static str)>,
}

impl PinyinTable {
    pub fn new() -> Self {
        let mut entries = RENDERINGS.to_vec();
        entries.sort_unstable_by_key(|&(ch, _)| ch);
        entries.dedup_by_key(|&mut (ch, _)| ch);
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PinyinTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptProvider for PinyinTable {
    fn is_target_char(&self, ch: char) -> bool {
        is_chinese_char(ch)
    }

    fn rendering(&self, ch: char) -> Option<&str> {
        self.entries
            .binary_search_by_key(&ch, |&(c, _)| c)
            .ok()
            .map(|i| self.entries[i].1)
    }
}
